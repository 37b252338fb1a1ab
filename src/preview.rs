//! Terminal preview of styled runs using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::error::Result;
use crate::export::RenderedContent;
use crate::style::{parse_color, Rgba};

fn term_color(value: Option<&str>) -> Option<Color> {
    value
        .and_then(parse_color)
        .filter(|c| c.a > 0)
        .map(|Rgba { r, g, b, .. }| Color::Rgb { r, g, b })
}

/// Write content to `out` with colours and attributes
pub fn write_runs<W: Write>(out: &mut W, content: &RenderedContent) -> Result<()> {
    for run in &content.runs {
        let style = run.resolved(&content.base);

        if let Some(fg) = term_color(style.color.as_deref()) {
            queue!(out, SetForegroundColor(fg))?;
        }
        if let Some(bg) = term_color(style.background_color.as_deref()) {
            queue!(out, SetBackgroundColor(bg))?;
        }
        if style.is_bold() {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.is_italic() {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if style.is_underlined() {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }

        queue!(out, Print(&run.text), SetAttribute(Attribute::Reset), ResetColor)?;
    }

    queue!(out, Print("\n"))?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Renderer;
    use crate::style::StyleDeclaration;

    #[test]
    fn test_term_color() {
        assert_eq!(term_color(Some("purple")), Some(Color::Rgb { r: 128, g: 0, b: 128 }));
        assert_eq!(term_color(Some("transparent")), None);
        assert_eq!(term_color(Some("nonsense")), None);
        assert_eq!(term_color(None), None);
    }

    #[test]
    fn test_write_runs_keeps_text() {
        let doc = "type: regex\npattern: '#\\w+'\nstyle:\n  color: blue\n  fontWeight: bold\n";
        let renderer = Renderer::from_document(StyleDeclaration::default(), Some(doc));
        let content = renderer.render("lunch #today");

        let mut out = Vec::new();
        write_runs(&mut out, &content).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.contains("lunch"));
        assert!(printed.contains("#today"));
        // Escape sequences are emitted around the styled run
        assert!(printed.contains('\u{1b}'));
        assert!(printed.ends_with('\n'));
    }
}
