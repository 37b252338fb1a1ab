//! Placeholder substitution in template text

use crate::error::{Result, WordshotError};

/// Default placeholder marker
pub const DEFAULT_MARKER: &str = "!{word}";

/// One expanded template, keyed by the value substituted into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Substituted value, also used as the archive entry name
    pub key: String,
    pub expanded_text: String,
}

/// Check that a marker can be substituted
pub fn validate_marker(marker: &str) -> Result<()> {
    if marker.is_empty() {
        return Err(WordshotError::InvalidMarker);
    }
    Ok(())
}

/// Replace every occurrence of `marker` with `value`, literally
pub fn expand(template: &str, marker: &str, value: &str) -> Result<String> {
    validate_marker(marker)?;
    Ok(template.replace(marker, value))
}

/// Expand the template once per value, keeping the order of `values`
pub fn expand_all(template: &str, marker: &str, values: &[String]) -> Result<Vec<BatchItem>> {
    validate_marker(marker)?;
    Ok(values
        .iter()
        .map(|value| BatchItem {
            key: value.clone(),
            expanded_text: template.replace(marker, value),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_once() {
        let out = expand("Hello !{word}!", DEFAULT_MARKER, "Ann").unwrap();
        assert_eq!(out, "Hello Ann!");
        assert!(!out.contains(DEFAULT_MARKER));
    }

    #[test]
    fn test_expand_every_occurrence() {
        let out = expand("!{word} and !{word}", DEFAULT_MARKER, "x").unwrap();
        assert_eq!(out, "x and x");
    }

    #[test]
    fn test_marker_is_literal() {
        assert_eq!(expand("a.b.c", ".", "-").unwrap(), "a-b-c");
        assert_eq!(expand("cost $1", "$1", "$2").unwrap(), "cost $2");
    }

    #[test]
    fn test_empty_marker() {
        assert!(matches!(expand("x", "", "y"), Err(WordshotError::InvalidMarker)));
        assert!(matches!(expand_all("x", "", &[]), Err(WordshotError::InvalidMarker)));
    }

    #[test]
    fn test_expand_all() {
        let values = vec!["Ann".to_string(), "Bo".to_string()];
        let items = expand_all("Hello !{word}!", DEFAULT_MARKER, &values).unwrap();
        assert_eq!(
            items,
            vec![
                BatchItem { key: "Ann".to_string(), expanded_text: "Hello Ann!".to_string() },
                BatchItem { key: "Bo".to_string(), expanded_text: "Hello Bo!".to_string() },
            ]
        );
    }
}
