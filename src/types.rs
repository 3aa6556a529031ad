use std::fmt;

/// A normalized channel name: lowercase, without the leading `#`.
///
/// Wrapping the string in a newtype means every lookup key in the
/// channel store went through `ChannelName::new` first, so `#Foo` and
/// `foo` always address the same channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        let name = name.strip_prefix('#').unwrap_or(name);
        Self(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who sent a message, as reported by the chat transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sender {
    pub display_name: String,
    pub username: String,
    pub is_moderator: bool,
    pub is_broadcaster: bool,
}

impl Sender {
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            display_name: username.clone(),
            username,
            is_moderator: false,
            is_broadcaster: false,
        }
    }

    /// Broadcasters can always moderate their own channel.
    pub fn can_moderate(&self) -> bool {
        self.is_moderator || self.is_broadcaster
    }

    /// The key used for opt-out bookkeeping.
    pub fn login(&self) -> String {
        self.username.to_lowercase()
    }
}

/// A single inbound chat event.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub channel: ChannelName,
    pub sender: Sender,
    pub text: String,
    pub is_self: bool,
}

/// Something the bot wants the transport to do: send `text` to `channel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub channel: ChannelName,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names_are_normalized() {
        assert_eq!(ChannelName::new("#SomeStreamer"), ChannelName::new("somestreamer"));
        assert_eq!(ChannelName::new(" #abc ").as_str(), "abc");
        assert_eq!(ChannelName::new("abc").to_string(), "#abc");
        assert!(ChannelName::new("#").is_empty());
    }

    #[test]
    fn broadcaster_can_moderate() {
        let mut sender = Sender::new("Streamer");
        assert!(!sender.can_moderate());
        sender.is_broadcaster = true;
        assert!(sender.can_moderate());
        assert_eq!(sender.login(), "streamer");
    }
}
