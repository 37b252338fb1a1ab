//! Applying style rules to text
//!
//! Styling happens in two layers. Matching decides, per rule, which tokens
//! fall entirely inside one of that rule's match ranges. Merging then folds
//! the declarations of every matching rule in document order, so a later
//! rule overrides an earlier one field by field.

use std::ops::Range;

use log::warn;

use super::declaration::StyleDeclaration;
use super::rules::{parse_rules, MatchRange, StyleRule};
use super::tokens::{tokenize, Token};
use crate::error::Result;

/// A piece of text together with the style it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    /// Byte range of this run in the source text
    pub span: Range<usize>,
    /// Merged declaration of all matching rules, or None for default styling
    pub style: Option<StyleDeclaration>,
}

impl StyledRun {
    /// Create an unstyled run
    pub fn plain(text: &str, span: Range<usize>) -> Self {
        Self {
            text: text.to_string(),
            span,
            style: None,
        }
    }

    /// Final style of this run on top of the caller's base style
    pub fn resolved(&self, base: &StyleDeclaration) -> StyleDeclaration {
        match &self.style {
            Some(style) => base.merged(style),
            None => base.clone(),
        }
    }
}

/// Per-rule match sets for one text
#[derive(Debug)]
pub struct RuleMatches<'t> {
    pub tokens: Vec<Token<'t>>,
    /// For each rule (in document order), the indices of tokens it styles
    pub per_rule: Vec<Vec<usize>>,
}

/// Tokens covered by the given ranges, never counting partial overlaps
fn covered_tokens(tokens: &[Token<'_>], ranges: &[MatchRange]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| ranges.iter().any(|range| range.contains(token)))
        .map(|(index, _)| index)
        .collect()
}

/// Tokenize text and collect, for every rule, the tokens it fully covers
pub fn match_rules<'t>(text: &'t str, rules: &[StyleRule]) -> RuleMatches<'t> {
    let tokens = tokenize(text);
    let per_rule = rules
        .iter()
        .map(|rule| covered_tokens(&tokens, &rule.match_ranges(text)))
        .collect();

    RuleMatches { tokens, per_rule }
}

/// Fold per-rule match sets into one run per token
pub fn merge_matches(matches: &RuleMatches<'_>, rules: &[StyleRule]) -> Vec<StyledRun> {
    let mut styles: Vec<Option<StyleDeclaration>> = vec![None; matches.tokens.len()];

    for (rule, covered) in rules.iter().zip(&matches.per_rule) {
        for &index in covered {
            let slot = &mut styles[index];
            *slot = Some(match slot.take() {
                Some(existing) => existing.merged(&rule.declaration),
                None => rule.declaration.clone(),
            });
        }
    }

    matches
        .tokens
        .iter()
        .zip(styles)
        .map(|(token, style)| StyledRun {
            text: token.text.to_string(),
            span: token.start..token.end,
            style,
        })
        .collect()
}

/// Style text with compiled rules
pub fn apply_style(text: &str, rules: &[StyleRule]) -> Vec<StyledRun> {
    let matches = match_rules(text, rules);
    merge_matches(&matches, rules)
}

/// Parse a rule document and style text with it
pub fn apply_style_document(text: &str, document: &str) -> Result<Vec<StyledRun>> {
    let rules = parse_rules(document)?;
    Ok(apply_style(text, &rules))
}

/// Like [`apply_style_document`], but an unusable document yields the text as
/// one unstyled run
pub fn apply_style_or_plain(text: &str, document: &str) -> Vec<StyledRun> {
    match apply_style_document(text, document) {
        Ok(runs) => runs,
        Err(e) => {
            warn!("Falling back to unstyled text: {}", e);
            vec![StyledRun::plain(text, 0..text.len())]
        }
    }
}
