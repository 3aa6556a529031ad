use std::sync::LazyLock;

use regex::Regex;

/// Maximal runs of word-ish characters, or maximal runs of anything else.
/// The two alternatives are complementary, so every character of the input
/// lands in exactly one match.
static RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}'\-]+|[^\p{L}\p{M}\p{N}'\-]+").expect("valid run pattern")
});

static WORD_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{M}\p{N}]").expect("valid word pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Contains at least one letter, combining mark or digit.
    Word,
    /// Whitespace, punctuation, symbols, or a bare run of `-`/`'`.
    Separator,
}

/// One run of a tokenized message. Borrows from the message it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str) -> Self {
        let kind = if WORD_CHAR_RE.is_match(text) {
            TokenKind::Word
        } else {
            TokenKind::Separator
        };
        Self { text, kind }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split a message into alternating word-ish and separator runs.
///
/// Concatenating the returned tokens in order gives back `message`
/// byte for byte. An empty message yields a single empty token.
pub fn tokenize(message: &str) -> Vec<Token<'_>> {
    let tokens: Vec<Token<'_>> = RUN_RE
        .find_iter(message)
        .map(|m| Token::new(m.as_str()))
        .collect();

    if tokens.is_empty() {
        return vec![Token::new(message)];
    }
    tokens
}
