use std::sync::LazyLock;

use regex::Regex;

/// A leading word core followed by whatever trails it.
static CORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?s)([\p{L}\p{M}\p{N}'\-]+)(.*)$").expect("valid core pattern")
});

/// Casing of the word being replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Upper,
    Capitalized,
    Lower,
}

impl Casing {
    fn of(core: &str) -> Self {
        let has_cased = core.chars().any(|c| c.is_uppercase() || c.is_lowercase());
        if has_cased && !core.chars().any(char::is_lowercase) {
            Casing::Upper
        } else if core.chars().next().is_some_and(char::is_uppercase) {
            Casing::Capitalized
        } else {
            Casing::Lower
        }
    }

    fn apply(self, word: &str) -> String {
        match self {
            Casing::Upper => word.to_uppercase(),
            Casing::Capitalized => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            Casing::Lower => word.to_lowercase(),
        }
    }
}

/// Replace the word core of `token` with `word`, keeping the original
/// casing style and any trailing punctuation.
pub fn substitute(token: &str, word: &str) -> String {
    let Some(caps) = CORE_RE.captures(token) else {
        return word.to_string();
    };
    let core = caps.get(1).map_or("", |m| m.as_str());
    let rest = caps.get(2).map_or("", |m| m.as_str());

    let mut out = Casing::of(core).apply(word);
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("BOAT", "BUTT")]
    #[case("Boat!", "Butt!")]
    #[case("boat,", "butt,")]
    #[case("bOAT", "butt")]
    #[case("BoAt", "Butt")]
    #[case("DON'T", "BUTT")]
    #[case("well-known...", "butt...")]
    #[case("A1", "BUTT")]
    #[case("ÉCOLE", "BUTT")]
    #[case("Émile", "Butt")]
    #[case("42", "butt")]
    fn casing_is_preserved(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(substitute(token, "butt"), expected);
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(substitute("Boat", "butt-head"), "Butt-head");
        assert_eq!(substitute("Boat", "ürün"), "Ürün");
    }

    #[test]
    fn lowercases_replacement_for_lowercase_tokens() {
        assert_eq!(substitute("boat", "Butt"), "butt");
    }

    #[test]
    fn tokens_without_a_core_fall_back_to_the_bare_word() {
        assert_eq!(substitute("!!", "butt"), "butt");
        assert_eq!(substitute("", "butt"), "butt");
    }

    #[test]
    fn trailing_remainder_is_kept_verbatim() {
        assert_eq!(substitute("boat?! ", "butt"), "butt?! ");
    }
}
