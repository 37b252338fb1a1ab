//! Style declarations for rendered text
//!
//! A declaration is a typed record over a fixed set of visual properties.
//! Values are passed through as written; nothing here interprets them.

use serde::{Deserialize, Deserializer};

/// Visual properties a style rule may set
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDeclaration {
    /// Text colour
    #[serde(default, deserialize_with = "scalar")]
    pub color: Option<String>,
    /// Background colour behind the text
    #[serde(default, deserialize_with = "scalar")]
    pub background_color: Option<String>,
    /// Font weight (`bold`, `400`, ...)
    #[serde(default, deserialize_with = "scalar")]
    pub font_weight: Option<String>,
    /// Font style (`italic`, `normal`)
    #[serde(default, deserialize_with = "scalar")]
    pub font_style: Option<String>,
    /// Font family name
    #[serde(default, deserialize_with = "scalar")]
    pub font_family: Option<String>,
    /// Font size (`20px`)
    #[serde(default, deserialize_with = "scalar")]
    pub font_size: Option<String>,
    /// Text decoration (`underline`, `line-through`)
    #[serde(default, deserialize_with = "scalar")]
    pub text_decoration: Option<String>,
}

/// Accept any YAML/TOML scalar and keep its textual form
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl StyleDeclaration {
    /// Create a declaration with just a colour
    pub fn color(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Default::default()
        }
    }

    /// Builder: set colour
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Builder: set background colour
    pub fn with_background(mut self, color: &str) -> Self {
        self.background_color = Some(color.to_string());
        self
    }

    /// Builder: set font weight
    pub fn with_weight(mut self, weight: &str) -> Self {
        self.font_weight = Some(weight.to_string());
        self
    }

    /// Builder: set font family
    pub fn with_family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    /// Builder: set font size
    pub fn with_size(mut self, size: &str) -> Self {
        self.font_size = Some(size.to_string());
        self
    }

    /// Builder: set text decoration
    pub fn with_decoration(mut self, decoration: &str) -> Self {
        self.text_decoration = Some(decoration.to_string());
        self
    }

    /// Check if no property is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Field-by-field merge where every property set in `over` wins
    pub fn merged(&self, over: &StyleDeclaration) -> StyleDeclaration {
        fn pick(base: &Option<String>, over: &Option<String>) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }

        StyleDeclaration {
            color: pick(&self.color, &over.color),
            background_color: pick(&self.background_color, &over.background_color),
            font_weight: pick(&self.font_weight, &over.font_weight),
            font_style: pick(&self.font_style, &over.font_style),
            font_family: pick(&self.font_family, &over.font_family),
            font_size: pick(&self.font_size, &over.font_size),
            text_decoration: pick(&self.text_decoration, &over.text_decoration),
        }
    }

    /// Whether the weight reads as bold (`bold`, `bolder` or >= 600)
    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_deref().map(str::trim) {
            Some("bold") | Some("bolder") => true,
            Some(w) => w.parse::<u32>().map_or(false, |n| n >= 600),
            None => false,
        }
    }

    pub fn is_italic(&self) -> bool {
        matches!(self.font_style.as_deref(), Some("italic") | Some("oblique"))
    }

    pub fn is_underlined(&self) -> bool {
        self.text_decoration
            .as_deref()
            .map_or(false, |d| d.contains("underline"))
    }
}
