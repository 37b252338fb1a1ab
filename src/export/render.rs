//! Turning text into renderable content

use log::warn;

use super::surface::RenderedContent;
use crate::style::{apply_style, parse_rules, StyleDeclaration, StyleRule};

/// Renders text with an optional rule set over a base style
///
/// Each call to [`Renderer::render`] is a pure function of the text, the
/// rules and the base style.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    rules: Option<Vec<StyleRule>>,
    base: StyleDeclaration,
}

impl Renderer {
    /// Renderer without style rules
    pub fn plain(base: StyleDeclaration) -> Self {
        Self { rules: None, base }
    }

    /// Renderer using compiled rules
    pub fn with_rules(base: StyleDeclaration, rules: Vec<StyleRule>) -> Self {
        Self {
            rules: Some(rules),
            base,
        }
    }

    /// Renderer for an optional rule document
    ///
    /// A document that fails to parse is reported once and the renderer
    /// falls back to unstyled text.
    pub fn from_document(base: StyleDeclaration, document: Option<&str>) -> Self {
        match document.map(parse_rules) {
            None => Self::plain(base),
            Some(Ok(rules)) => Self::with_rules(base, rules),
            Some(Err(e)) => {
                warn!("Ignoring style rules, rendering plain text: {}", e);
                Self::plain(base)
            }
        }
    }

    pub fn is_styled(&self) -> bool {
        self.rules.is_some()
    }

    pub fn render(&self, text: &str) -> RenderedContent {
        match &self.rules {
            Some(rules) => RenderedContent {
                runs: apply_style(text, rules),
                base: self.base.clone(),
            },
            None => RenderedContent::plain(text, self.base.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_is_one_run() {
        let renderer = Renderer::plain(StyleDeclaration::color("black"));
        let content = renderer.render("two words");
        assert_eq!(content.runs.len(), 1);
        assert_eq!(content.text(), "two words");
        assert_eq!(content.base.color.as_deref(), Some("black"));
    }

    #[test]
    fn test_document_render() {
        let doc = "type: regex\npattern: world\nstyle:\n  color: red\n";
        let renderer = Renderer::from_document(StyleDeclaration::default(), Some(doc));
        assert!(renderer.is_styled());

        let content = renderer.render("hello world");
        assert_eq!(content.runs.len(), 3);
        assert_eq!(content.runs[2].style.as_ref().unwrap().color.as_deref(), Some("red"));
    }

    #[test]
    fn test_bad_document_falls_back() {
        let renderer = Renderer::from_document(StyleDeclaration::default(), Some("type: regex\n"));
        assert!(!renderer.is_styled());
        assert_eq!(renderer.render("Any text here").runs.len(), 1);
    }
}
