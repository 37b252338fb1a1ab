//! Colour values used by styled text
//!
//! Parses the CSS colour notations that show up in style rules:
//! hex (`#rgb`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()` and basic names.

/// An RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// CSS basic and common extended colour keywords
const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::rgb(0, 0, 0)),
    ("silver", Rgba::rgb(192, 192, 192)),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("white", Rgba::rgb(255, 255, 255)),
    ("maroon", Rgba::rgb(128, 0, 0)),
    ("red", Rgba::rgb(255, 0, 0)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("fuchsia", Rgba::rgb(255, 0, 255)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("green", Rgba::rgb(0, 128, 0)),
    ("lime", Rgba::rgb(0, 255, 0)),
    ("olive", Rgba::rgb(128, 128, 0)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("navy", Rgba::rgb(0, 0, 128)),
    ("blue", Rgba::rgb(0, 0, 255)),
    ("teal", Rgba::rgb(0, 128, 128)),
    ("aqua", Rgba::rgb(0, 255, 255)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("pink", Rgba::rgb(255, 192, 203)),
    ("brown", Rgba::rgb(165, 42, 42)),
    ("gold", Rgba::rgb(255, 215, 0)),
    ("transparent", Rgba::TRANSPARENT),
];

/// Parse a CSS colour string
pub fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_functional(args);
    }

    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    // Short form doubles each digit: #f80 == #ff8800
    let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);

    match hex.len() {
        3 => Some(Rgba::rgb(short(0)?, short(1)?, short(2)?)),
        6 => Some(Rgba::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Rgba {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
            a: channel(&hex[6..8])?,
        }),
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = match parts.get(3) {
        Some(alpha) => {
            let alpha = alpha.parse::<f32>().ok()?;
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };

    Some(Rgba { r, g, b, a })
}
