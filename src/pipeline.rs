use tracing::trace;

use crate::filter::eligible_indices;
use crate::gate::should_skip;
use crate::random::RandomSource;
use crate::selector::select_targets;
use crate::state::ChannelConfig;
use crate::substitute::substitute;
use crate::tokenizer::tokenize;

/// Run one message through gate, tokenizer, filter, selector and
/// substituter.
///
/// Returns `None` when nothing changed. The rate roll, opt-out and
/// cooldown are the caller's business; this function only transforms.
pub fn buttify(
    message: &str,
    config: &ChannelConfig,
    rng: &mut dyn RandomSource,
) -> Option<String> {
    if should_skip(message) {
        return None;
    }

    let word = config.word();
    let tokens = tokenize(message);
    let eligible = eligible_indices(&tokens, word);
    if eligible.is_empty() {
        return None;
    }

    let chosen = select_targets(eligible, config.max_replacements(), rng);
    trace!(targets = ?chosen, "selected replacement targets");

    let mut out = String::with_capacity(message.len());
    for (i, token) in tokens.iter().enumerate() {
        if chosen.contains(&i) {
            out.push_str(&substitute(token.text, word));
        } else {
            out.push_str(token.text);
        }
    }

    let out = out.trim();
    if out == message.trim() {
        return None;
    }
    Some(out.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::OsRandom;
    use crate::random::testing::Scripted;

    fn config(max: usize) -> ChannelConfig {
        ChannelConfig::new("butt", 1.0, max)
    }

    #[test]
    fn short_messages_are_untouched() {
        let mut rng = Scripted::default();
        assert_eq!(buttify("hi", &config(5), &mut rng), None);
    }

    #[test]
    fn lone_mention_is_untouched() {
        let mut rng = Scripted::default();
        assert_eq!(buttify("@ab", &config(5), &mut rng), None);
    }

    #[test]
    fn messages_made_of_the_word_are_untouched() {
        let mut rng = Scripted::default();
        assert_eq!(buttify("butt butter BUTTS", &config(5), &mut rng), None);
    }

    #[test]
    fn replaces_one_word_keeping_everything_else() {
        // Identity shuffle, 0.5 asks for one replacement: the first target.
        let mut rng = Scripted::floats(&[0.5]);
        assert_eq!(
            buttify("  Nice boat, friend!  ", &config(5), &mut rng).as_deref(),
            Some("Butt boat, friend!")
        );
    }

    #[test]
    fn replaces_every_word_when_draw_asks_for_all() {
        let mut rng = Scripted::floats(&[0.999]);
        assert_eq!(
            buttify("NICE Boat, friend", &config(5), &mut rng).as_deref(),
            Some("BUTT Butt, butt")
        );
    }

    #[test]
    fn max_one_caps_every_output() {
        let mut rng = OsRandom::seeded(3);
        let message = "the quick brown fox jumps over the lazy dog";
        for _ in 0..1000 {
            let out = buttify(message, &config(1), &mut rng).expect("eligible message");
            let replaced = out.split(' ').filter(|w| *w == "butt").count();
            assert_eq!(replaced, 1, "{out}");
        }
    }

    #[test]
    fn output_never_exceeds_max_replacements() {
        let mut rng = OsRandom::seeded(11);
        let message = "one two three four five six seven eight nine ten";
        for _ in 0..2000 {
            let out = buttify(message, &config(3), &mut rng).expect("eligible message");
            let replaced = out.split(' ').filter(|w| *w == "butt").count();
            assert!((1..=3).contains(&replaced), "{out}");
        }
    }

    #[test]
    fn mentions_and_emotes_survive() {
        let mut rng = Scripted::floats(&[0.999]);
        assert_eq!(
            buttify("@streamer :kappa: great stream", &config(5), &mut rng).as_deref(),
            Some("@streamer :kappa: butt butt")
        );
    }
}
