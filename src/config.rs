use secrecy::{ExposeSecret, Secret};

use crate::error::BotError;
use crate::state::{ChannelConfig, ChannelStore, clamp_replacements, sanitize_word};
use crate::types::ChannelName;

pub const DEFAULT_WORD: &str = "butt";
pub const DEFAULT_RATE: f64 = 0.1;
pub const DEFAULT_MAX_REPLACEMENTS: usize = 1;
pub const DEFAULT_RELAY: &str = "127.0.0.1:6667";

/// Startup configuration. Read once; nothing here changes at runtime.
#[derive(Debug)]
pub struct BotConfig {
    pub username: String,
    pub token: Secret<String>,
    pub channels: Vec<ChannelName>,
    pub word: String,
    pub rate: f64,
    pub max_replacements: usize,
    pub relay: String,
}

/// Accumulates settings and validates them in `build`.
pub struct BotConfigBuilder {
    username: String,
    token: String,
    channels: Vec<String>,
    word: String,
    rate: f64,
    max_replacements: usize,
    relay: String,
}

impl BotConfig {
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder {
            username: String::new(),
            token: String::new(),
            channels: Vec::new(),
            word: DEFAULT_WORD.to_string(),
            rate: DEFAULT_RATE,
            max_replacements: DEFAULT_MAX_REPLACEMENTS,
            relay: DEFAULT_RELAY.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// One fresh channel config per configured channel, seeded with the
    /// defaults.
    pub fn channel_store(&self) -> ChannelStore {
        let mut store = ChannelStore::new();
        for name in &self.channels {
            store.add_channel(
                name.clone(),
                ChannelConfig::new(self.word.clone(), self.rate, self.max_replacements),
            );
        }
        store
    }
}

impl BotConfigBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channels.push(channel.into());
        self
    }

    pub fn channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels.extend(channels.into_iter().map(Into::into));
        self
    }

    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.word = word.into();
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn max_replacements(mut self, max: usize) -> Self {
        self.max_replacements = max;
        self
    }

    pub fn relay(mut self, relay: impl Into<String>) -> Self {
        self.relay = relay.into();
        self
    }

    pub fn build(self) -> Result<BotConfig, BotError> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(BotError::Config("bot username is required".into()));
        }

        let token = self.token.trim().to_string();
        if token.is_empty() {
            return Err(BotError::Config("bot token is required".into()));
        }

        let mut channels: Vec<ChannelName> = Vec::new();
        for name in self.channels.iter().flat_map(|c| c.split(',')) {
            let name = ChannelName::new(name);
            if !name.is_empty() && !channels.contains(&name) {
                channels.push(name);
            }
        }
        if channels.is_empty() {
            return Err(BotError::Config("at least one channel is required".into()));
        }

        let word = sanitize_word(&self.word);
        if word.is_empty() {
            return Err(BotError::Config(format!(
                "substitute word {:?} has no usable characters",
                self.word
            )));
        }

        if !self.rate.is_finite() {
            return Err(BotError::Config(format!("rate {} is not a number", self.rate)));
        }

        let relay = self.relay.trim().to_string();
        if relay.is_empty() {
            return Err(BotError::Config("relay address is required".into()));
        }

        Ok(BotConfig {
            username,
            token: Secret::new(token),
            channels,
            word,
            rate: self.rate.clamp(0.0, 1.0),
            max_replacements: clamp_replacements(self.max_replacements as i64),
            relay,
        })
    }
}
