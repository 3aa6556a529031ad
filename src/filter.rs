use std::sync::LazyLock;

use regex::Regex;

use crate::tokenizer::Token;

/// Optional scheme, one or more dot-terminated labels, a final label of at
/// least two characters, optional path.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[a-z][a-z0-9+.\-]*://)?(?:[\p{L}\p{N}\-]+\.)+[\p{L}\p{N}\-]{2,}(?:[/?#]\S*)?$",
    )
    .expect("valid url pattern")
});

/// Mentions, emote codes and links, judged on their raw text.
fn is_excluded_fragment(text: &str) -> bool {
    if text.starts_with('@') || text.starts_with(':') {
        return true;
    }
    let lower = text.to_lowercase();
    lower.contains("http") || lower.contains("www.") || URL_RE.is_match(text)
}

/// Whether a single token may be replaced with `substitute`.
pub fn is_eligible(token: &Token<'_>, substitute: &str) -> bool {
    if !token.is_word() || token.char_len() <= 1 {
        return false;
    }
    if !substitute.is_empty() && token.text.to_lowercase().contains(substitute) {
        return false;
    }
    !is_excluded_fragment(token.text)
}

/// Indices of every replaceable token in `tokens`.
///
/// The tokenizer splits `@name` into `@` and `name`, so besides the token
/// itself this also checks the whitespace-delimited chunk the token sits
/// in. A word inside a mention, an `:emote:` or a link is never a target.
pub fn eligible_indices(tokens: &[Token<'_>], substitute: &str) -> Vec<usize> {
    let message: String = tokens.iter().map(|t| t.text).collect();
    let mut chunks = chunks(&message).into_iter().peekable();
    let mut eligible = Vec::new();
    let mut offset = 0;

    for (i, token) in tokens.iter().enumerate() {
        let start = offset;
        offset += token.text.len();

        if !is_eligible(token, substitute) {
            continue;
        }
        // Word tokens hold no whitespace, so each sits inside one chunk.
        while chunks.next_if(|chunk| chunk.end <= start).is_some() {}
        if chunks.peek().is_some_and(|chunk| !chunk.excluded) {
            eligible.push(i);
        }
    }

    eligible
}

/// A whitespace-delimited span of a message.
struct Chunk {
    end: usize,
    excluded: bool,
}

/// Every whitespace-delimited span of `message`, in order, each judged
/// once against the mention, emote and link rules.
fn chunks(message: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut start = None;

    for (i, c) in message.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(from)) => {
                chunks.push(Chunk {
                    end: i,
                    excluded: is_excluded_fragment(&message[from..i]),
                });
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(from) = start {
        chunks.push(Chunk {
            end: message.len(),
            excluded: is_excluded_fragment(&message[from..]),
        });
    }

    chunks
}
