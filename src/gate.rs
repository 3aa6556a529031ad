/// Messages starting with this are commands, never transformed.
pub const COMMAND_PREFIX: char = '!';

const MIN_MESSAGE_CHARS: usize = 3;

/// Cheap whole-message checks that run before tokenizing.
///
/// Returns true for messages the bot should leave alone: too short,
/// commands, anything carrying a link, and messages without a single
/// ASCII letter.
pub fn should_skip(message: &str) -> bool {
    let trimmed = message.trim();

    if trimmed.chars().count() < MIN_MESSAGE_CHARS {
        return true;
    }
    if trimmed.starts_with(COMMAND_PREFIX) {
        return true;
    }
    if ["http://", "https://", "www."]
        .iter()
        .any(|needle| message.contains(needle))
    {
        return true;
    }
    !trimmed.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ok", true)]
    #[case("   ok   ", true)]
    #[case("", true)]
    #[case("check https://x.io", true)]
    #[case("plain http://x.io link", true)]
    #[case("visit www.example.com", true)]
    #[case("!cmd", true)]
    #[case("  !butt rate 1", true)]
    #[case("1234 !! ***", true)]
    #[case("🎉🎉🎉", true)]
    #[case("Привет мир", true)]
    #[case("hey", false)]
    #[case("nice boat there", false)]
    #[case("wait! what", false)]
    #[case("24/7 gaming", false)]
    fn gate(#[case] message: &str, #[case] skipped: bool) {
        assert_eq!(should_skip(message), skipped, "{message:?}");
    }
}
