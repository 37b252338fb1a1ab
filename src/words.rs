//! Word list normalization
//!
//! Word lists are plain delimited text (`alpha, beta, gamma`). A delimiter
//! preceded by a backslash is part of the term rather than a separator.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, WordshotError};

/// Default term delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Split on delimiters not preceded by a backslash
///
/// The escape stays in the term: `one\, two` is the single term `one\, two`.
fn split_unescaped(raw: &str, delimiter: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut prev = None;

    for ch in raw.chars() {
        if ch == delimiter && prev != Some('\\') {
            pieces.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        prev = Some(ch);
    }
    pieces.push(current);

    pieces
}

/// Decompose and drop combining marks ("café" -> "cafe")
///
/// Only marks that combine with a base character are removed; spacing
/// accents such as `^` or `¨` are ordinary characters and stay.
pub fn strip_diacritics(term: &str) -> String {
    term.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normalize a word list using a custom delimiter
pub fn normalize_with(raw: &str, delimiter: char) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for piece in split_unescaped(raw, delimiter) {
        let trimmed = piece.trim();
        if trimmed.is_empty() {
            continue;
        }
        let term = strip_diacritics(trimmed);
        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    terms
}

/// Normalize a comma-delimited word list
///
/// Terms are trimmed, stripped of diacritics and deduplicated keeping the
/// first occurrence. Order is preserved; nothing is sorted.
pub fn normalize(raw: &str) -> Vec<String> {
    normalize_with(raw, DEFAULT_DELIMITER)
}

/// Normalize raw bytes, failing if they are not text
pub fn normalize_bytes(raw: &[u8], delimiter: char) -> Result<Vec<String>> {
    let text = std::str::from_utf8(raw).map_err(|e| {
        WordshotError::MalformedInput(format!("word list is not valid UTF-8: {}", e))
    })?;

    if text.contains('\0') {
        return Err(WordshotError::MalformedInput(
            "word list contains binary data".to_string(),
        ));
    }

    Ok(normalize_with(text, delimiter))
}

/// Union two term lists, dropping duplicates, and sort the result
pub fn merge(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = existing.iter().chain(incoming).cloned().collect();
    merged.sort();
    merged.dedup();
    merged
}
