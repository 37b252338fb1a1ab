//! Rule-based text styling
//!
//! This module turns free text plus a set of style rules into a sequence
//! of styled runs:
//! - Tokenizing text into word and whitespace runs
//! - Matching rules against the text
//! - Merging the declarations of matching rules per token

pub mod color;
mod declaration;
mod engine;
mod rules;
mod tokens;

pub use color::{parse_color, Rgba};
pub use declaration::StyleDeclaration;
pub use engine::{
    apply_style, apply_style_document, apply_style_or_plain, match_rules, merge_matches,
    RuleMatches, StyledRun,
};
pub use rules::{parse_rules, MatchKind, MatchRange, StyleRule};
pub use tokens::{tokenize, Token, TokenKind};
