//! Style rules and their match ranges
//!
//! A rule pairs a matcher with the declaration to apply where it matches.
//! Rule documents are YAML, either a single rule or a list of rules:
//!
//! ```yaml
//! type: regex
//! pattern: '\b\w+ing\b'
//! style:
//!   color: purple
//! ```

use regex::Regex;
use serde::Deserialize;

use super::declaration::StyleDeclaration;
use super::tokens::Token;
use crate::error::{Result, WordshotError};

/// How a rule's pattern is matched against text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MatchKind {
    /// Regular expression, applied globally left to right
    Regex,
}

impl MatchKind {
    /// Get the document name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            MatchKind::Regex => "regex",
        }
    }

    /// Parse a kind from its document name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "regex" => Some(MatchKind::Regex),
            _ => None,
        }
    }
}

/// Half-open byte interval where a rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check whether the whole token lies inside this range
    pub fn contains(&self, token: &Token<'_>) -> bool {
        token.within(self.start, self.end)
    }
}

/// A compiled style rule
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub kind: MatchKind,
    /// Compiled pattern
    pub pattern: Regex,
    /// Declaration to apply to matched tokens
    pub declaration: StyleDeclaration,
}

impl StyleRule {
    /// Compile a rule of the given kind
    pub fn new(kind: MatchKind, pattern: &str, declaration: StyleDeclaration) -> Result<Self> {
        let pattern = match kind {
            MatchKind::Regex => Regex::new(pattern).map_err(|e| {
                WordshotError::InvalidStyleRule(format!("pattern {:?} does not compile: {}", pattern, e))
            })?,
        };

        Ok(Self {
            kind,
            pattern,
            declaration,
        })
    }

    /// Compile a regex rule
    pub fn regex(pattern: &str, declaration: StyleDeclaration) -> Result<Self> {
        Self::new(MatchKind::Regex, pattern, declaration)
    }

    /// Pattern source as written in the document
    pub fn source(&self) -> &str {
        self.pattern.as_str()
    }

    /// All non-overlapping matches, scanning left to right
    pub fn match_ranges(&self, text: &str) -> Vec<MatchRange> {
        self.pattern
            .find_iter(text)
            .map(|m| MatchRange::new(m.start(), m.end()))
            .collect()
    }
}

/// A rule as written in a document, before validation
#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(rename = "type")]
    kind: Option<String>,
    pattern: Option<String>,
    style: Option<StyleDeclaration>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Many(Vec<RawRule>),
    One(RawRule),
}

impl RawRule {
    fn compile(self, index: usize) -> Result<StyleRule> {
        let missing = |field: &str| {
            WordshotError::InvalidStyleRule(format!("rule {} is missing required field `{}`", index, field))
        };

        let kind = self.kind.filter(|k| !k.trim().is_empty()).ok_or_else(|| missing("type"))?;
        let pattern = self.pattern.filter(|p| !p.is_empty()).ok_or_else(|| missing("pattern"))?;
        let declaration = self.style.ok_or_else(|| missing("style"))?;

        let kind = MatchKind::from_name(&kind).ok_or_else(|| {
            WordshotError::InvalidStyleRule(format!("unsupported style type: {}", kind))
        })?;

        StyleRule::new(kind, &pattern, declaration)
    }
}

/// Parse and compile a style-rule document
///
/// Any malformed rule fails the whole document.
pub fn parse_rules(document: &str) -> Result<Vec<StyleRule>> {
    let raw: Option<RawDocument> = serde_yaml::from_str(document)
        .map_err(|e| WordshotError::InvalidStyleRule(format!("unreadable rule document: {}", e)))?;

    let raw = match raw {
        Some(RawDocument::Many(rules)) => rules,
        Some(RawDocument::One(rule)) => vec![rule],
        None => {
            return Err(WordshotError::InvalidStyleRule(
                "rule document is empty".to_string(),
            ))
        }
    };

    raw.into_iter()
        .enumerate()
        .map(|(index, rule)| rule.compile(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ranges_are_global() {
        let rule = StyleRule::regex(r"\d+", StyleDeclaration::default()).unwrap();
        assert_eq!(
            rule.match_ranges("a 12 b 345"),
            vec![MatchRange::new(2, 4), MatchRange::new(7, 10)]
        );
        assert!(rule.match_ranges("no numbers").is_empty());
    }

    #[test]
    fn test_matches_resume_after_previous_end() {
        let rule = StyleRule::regex("aa", StyleDeclaration::default()).unwrap();
        assert_eq!(
            rule.match_ranges("aaaaa"),
            vec![MatchRange::new(0, 2), MatchRange::new(2, 4)]
        );
    }

    #[test]
    fn test_parse_single_rule() {
        let doc = "type: regex\npattern: '\\b\\w+ing\\b'\nstyle:\n  color: purple\n";
        let rules = parse_rules(doc).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].kind, MatchKind::Regex);
        assert_eq!(rules[0].source(), r"\b\w+ing\b");
        assert_eq!(rules[0].declaration.color.as_deref(), Some("purple"));
    }

    #[test]
    fn test_parse_rule_list() {
        let doc = r#"
- type: Regex
  pattern: '#\w+'
  style:
    color: blue
- type: regex
  pattern: '\$\d+(\.\d{2})?'
  style:
    color: green
    fontWeight: bold
"#;
        let rules = parse_rules(doc).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].declaration.font_weight.as_deref(), Some("bold"));
    }

    #[test]
    fn test_missing_fields_are_invalid() {
        let doc = "type: regex\npattern:\nstyle:\n";
        let err = parse_rules(doc).unwrap_err();
        assert!(matches!(err, WordshotError::InvalidStyleRule(_)));
        assert!(err.to_string().contains("pattern"));

        let doc = "type: regex\nstyle:\n  color: red\n";
        assert!(matches!(parse_rules(doc), Err(WordshotError::InvalidStyleRule(_))));

        let doc = "pattern: 'a+'\nstyle:\n  color: red\n";
        let err = parse_rules(doc).unwrap_err();
        assert!(matches!(err, WordshotError::InvalidStyleRule(_)));
        assert!(err.to_string().contains("`type`"));

        let doc = "type: regex\npattern: 'a+'\n";
        let err = parse_rules(doc).unwrap_err();
        assert!(matches!(err, WordshotError::InvalidStyleRule(_)));
        assert!(err.to_string().contains("`style`"));

        let doc = "- type: regex\n  pattern: a\n  style:\n    color: red\n- type: regex\n  pattern: b\n";
        let err = parse_rules(doc).unwrap_err();
        assert!(err.to_string().contains("rule 1"));
    }

    #[test]
    fn test_unsupported_type_and_bad_pattern() {
        let doc = "type: glob\npattern: '*.txt'\nstyle:\n  color: red\n";
        let err = parse_rules(doc).unwrap_err();
        assert!(err.to_string().contains("unsupported style type"));

        let doc = "type: regex\npattern: '(unclosed'\nstyle:\n  color: red\n";
        assert!(matches!(parse_rules(doc), Err(WordshotError::InvalidStyleRule(_))));
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(parse_rules(""), Err(WordshotError::InvalidStyleRule(_))));
        assert!(matches!(parse_rules("just text"), Err(WordshotError::InvalidStyleRule(_))));
    }
}
