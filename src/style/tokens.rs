//! Tokenization of input text
//!
//! Text is split into alternating runs of non-whitespace ("words") and
//! whitespace ("spaces"). Tokens partition the text exactly: concatenating
//! them in order gives back the input, and no two neighbours share a kind.

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Maximal run of non-whitespace characters
    Word,
    /// Maximal run of whitespace characters
    Space,
}

impl TokenKind {
    fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            TokenKind::Space
        } else {
            TokenKind::Word
        }
    }

    /// Get a human-readable name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Word => "word",
            TokenKind::Space => "space",
        }
    }
}

/// A token borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset where this token starts (inclusive)
    pub start: usize,
    /// Byte offset where this token ends (exclusive)
    pub end: usize,
    pub kind: TokenKind,
}

impl Token<'_> {
    /// Check whether this token lies fully inside `start..end`
    pub fn within(&self, start: usize, end: usize) -> bool {
        self.start >= start && self.end <= end
    }
}

/// Split text into word and space tokens
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices();

    let Some((_, first)) = chars.next() else {
        return tokens;
    };

    let mut start = 0;
    let mut kind = TokenKind::of(first);

    for (pos, ch) in chars {
        let next_kind = TokenKind::of(ch);
        if next_kind != kind {
            tokens.push(Token {
                text: &text[start..pos],
                start,
                end: pos,
                kind,
            });
            start = pos;
            kind = next_kind;
        }
    }

    tokens.push(Token {
        text: &text[start..],
        start,
        end: text.len(),
        kind,
    });

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(text: &str) {
        let tokens = tokenize(text);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, text);

        let mut expected_start = 0;
        for token in &tokens {
            assert!(!token.text.is_empty());
            assert_eq!(token.start, expected_start);
            assert_eq!(&text[token.start..token.end], token.text);
            expected_start = token.end;
        }
        assert_eq!(expected_start, text.len());

        for pair in tokens.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_words_and_spaces() {
        let tokens = tokenize("I was  running.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["I", " ", "was", "  ", "running."]);
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[3].kind, TokenKind::Space);
        assert_eq!((tokens[4].start, tokens[4].end), (7, 15));
    }

    #[test]
    fn test_partition_property() {
        for text in [
            "plain",
            "  leading and trailing  ",
            "tabs\tand\nnewlines\r\n",
            "café au lait — naïve",
            "\u{3000}ideographic\u{3000}space",
            "$5.00 on #lunch and #coffee.",
        ] {
            assert_partition(text);
        }
    }

    #[test]
    fn test_token_within() {
        let tokens = tokenize("ab cd");
        assert!(tokens[2].within(3, 5));
        assert!(tokens[2].within(0, 5));
        assert!(!tokens[2].within(4, 5));
    }
}
