use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::types::ChannelName;

pub const MAX_WORD_CHARS: usize = 24;
pub const MIN_REPLACEMENTS: usize = 1;
pub const MAX_REPLACEMENTS: usize = 5;

/// Quiet period after a transformation-triggered send.
pub const COOLDOWN: Duration = Duration::from_millis(1500);

static WORD_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}'\-]$").expect("valid word char pattern"));

/// Lowercase, drop anything that isn't a letter, mark, digit, hyphen or
/// apostrophe, and cut to 24 characters. May return an empty string.
pub fn sanitize_word(raw: &str) -> String {
    let mut buf = [0u8; 4];
    raw.to_lowercase()
        .chars()
        .filter(|c| WORD_CHAR_RE.is_match(c.encode_utf8(&mut buf)))
        .take(MAX_WORD_CHARS)
        .collect()
}

/// Clamp a requested replacement cap into `1..=5`.
pub fn clamp_replacements(n: i64) -> usize {
    n.clamp(MIN_REPLACEMENTS as i64, MAX_REPLACEMENTS as i64) as usize
}

/// Runtime settings for one channel.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    word: String,
    rate: f64,
    max_replacements: usize,
    pub enabled: bool,
    opt_out: HashSet<String>,
    cooldown_until: Option<Instant>,
}

impl ChannelConfig {
    /// `word` is expected to be sanitized already; `rate` and `max` are
    /// clamped into range.
    pub fn new(word: impl Into<String>, rate: f64, max_replacements: usize) -> Self {
        let rate = if rate.is_finite() { rate.clamp(0.0, 1.0) } else { 0.0 };
        let mut config = Self {
            word: word.into(),
            rate,
            max_replacements: MIN_REPLACEMENTS,
            enabled: true,
            opt_out: HashSet::new(),
            cooldown_until: None,
        };
        config.set_max_replacements(max_replacements as i64);
        config
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn max_replacements(&self) -> usize {
        self.max_replacements
    }

    /// Only values in `[0, 1]` are taken; anything else keeps the
    /// current rate.
    pub fn set_rate(&mut self, rate: f64) -> f64 {
        if (0.0..=1.0).contains(&rate) {
            self.rate = rate;
        }
        self.rate
    }

    pub fn set_max_replacements(&mut self, max: i64) -> usize {
        self.max_replacements = clamp_replacements(max);
        self.max_replacements
    }

    /// Sanitizes `raw` first; a result that sanitizes to nothing leaves
    /// the current word in place.
    pub fn set_word(&mut self, raw: &str) -> &str {
        let word = sanitize_word(raw);
        if !word.is_empty() {
            self.word = word;
        }
        &self.word
    }

    /// Returns false if the user had already opted out.
    pub fn opt_out(&mut self, login: &str) -> bool {
        self.opt_out.insert(login.to_lowercase())
    }

    /// Returns false if the user wasn't opted out.
    pub fn opt_in(&mut self, login: &str) -> bool {
        self.opt_out.remove(&login.to_lowercase())
    }

    pub fn is_opted_out(&self, login: &str) -> bool {
        self.opt_out.contains(&login.to_lowercase())
    }

    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    pub fn start_cooldown(&mut self, now: Instant) {
        self.cooldown_until = Some(now + COOLDOWN);
    }
}

/// Every joined channel's config, keyed by normalized name.
///
/// Owned by the bot and passed around by reference; all access happens
/// from the single event-handling task, so there is no locking.
#[derive(Debug, Default)]
pub struct ChannelStore {
    channels: HashMap<ChannelName, ChannelConfig>,
}

impl ChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with `config`. An existing entry is kept as is.
    pub fn add_channel(&mut self, name: ChannelName, config: ChannelConfig) {
        self.channels.entry(name).or_insert(config);
    }

    pub fn get(&self, name: &ChannelName) -> Option<&ChannelConfig> {
        self.channels.get(name)
    }

    pub fn get_mut(&mut self, name: &ChannelName) -> Option<&mut ChannelConfig> {
        self.channels.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
