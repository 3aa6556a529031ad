use crate::error::BotError;
use crate::gate::COMMAND_PREFIX;
use crate::state::ChannelConfig;
use crate::types::Sender;

pub const HINT: &str =
    "!buttignore to opt out, !buttallow to opt back in. Mods: !butt rate|word|max|on|off";
pub const USAGE: &str = "usage: !butt rate <0-1> | word <text> | max <1-5> | on | off";

/// Every command the bot understands. Closed set, so enum dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ignore,
    Allow,
    Hint,
    /// `None` when the argument was missing or not a number.
    Rate(Option<f64>),
    Word(String),
    /// `None` when the argument was missing or not an integer.
    Max(Option<i64>),
    On,
    Off,
    Usage,
}

/// Parse a replacement cap. Integers too large for `i64` saturate, so the
/// later clamp still applies to them.
fn parse_cap(arg: &str) -> Option<i64> {
    if let Ok(n) = arg.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match arg.as_bytes().first() {
        Some(b'-') => (true, &arg[1..]),
        Some(b'+') => (false, &arg[1..]),
        _ => (false, arg),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// What the caller should do after executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Reply(String),
    /// No reply and no state change.
    Silent,
}

impl Command {
    /// Parse a `!` prefixed line. Commands that belong to other bots are
    /// reported as parse errors so the caller can ignore them.
    pub fn parse(input: &str) -> Result<Self, BotError> {
        let input = input.trim();
        let Some(input) = input.strip_prefix(COMMAND_PREFIX) else {
            return Err(BotError::Parse("commands start with !".into()));
        };

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();

        match cmd.as_str() {
            "buttignore" | "ignoreme" => Ok(Command::Ignore),
            "buttallow" | "unignoreme" => Ok(Command::Allow),
            "butt" => {
                let Some(sub) = parts.next() else {
                    return Ok(Command::Hint);
                };
                match sub.to_lowercase().as_str() {
                    "rate" => Ok(Command::Rate(parts.next().and_then(|a| a.parse().ok()))),
                    "word" => Ok(Command::Word(parts.collect::<Vec<_>>().join(" "))),
                    "max" => Ok(Command::Max(parts.next().and_then(parse_cap))),
                    "on" => Ok(Command::On),
                    "off" => Ok(Command::Off),
                    _ => Ok(Command::Usage),
                }
            }
            _ => Err(BotError::Parse(format!("unknown command: !{cmd}"))),
        }
    }

    pub fn requires_moderator(&self) -> bool {
        !matches!(self, Command::Ignore | Command::Allow | Command::Hint)
    }

    /// Apply the command to `channel` on behalf of `sender`.
    pub fn execute(self, sender: &Sender, channel: &mut ChannelConfig) -> CommandResult {
        if self.requires_moderator() && !sender.can_moderate() {
            return CommandResult::Silent;
        }

        let reply = match self {
            Command::Ignore => {
                channel.opt_out(&sender.login());
                format!(
                    "{}, you won't be buttified anymore. Type !buttallow to opt back in.",
                    sender.display_name
                )
            }
            Command::Allow => {
                channel.opt_in(&sender.login());
                format!(
                    "Welcome back, {}! Your messages are fair game again.",
                    sender.display_name
                )
            }
            Command::Hint => HINT.to_string(),
            Command::Rate(value) => {
                let rate = match value {
                    Some(v) => channel.set_rate(v),
                    None => channel.rate(),
                };
                format!("rate is now {rate}")
            }
            Command::Word(raw) => format!("word is now \"{}\"", channel.set_word(&raw)),
            Command::Max(value) => {
                let max = match value {
                    Some(v) => channel.set_max_replacements(v),
                    None => channel.max_replacements(),
                };
                format!("max replacements is now {max}")
            }
            Command::On => {
                channel.enabled = true;
                "buttification enabled".to_string()
            }
            Command::Off => {
                channel.enabled = false;
                "buttification disabled".to_string()
            }
            Command::Usage => USAGE.to_string(),
        };

        CommandResult::Reply(reply)
    }
}
