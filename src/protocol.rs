use crate::error::BotError;
use crate::types::{ChannelName, ChatEvent, Sender};

/// Relay wire format, one frame per line:
///
///   TYPE:PAYLOAD\n
///
/// Inbound:
///   MSG:channel:username:display:flags:body   a chat message
///   PING:token                                 keep-alive
///
/// Outbound:
///   AUTH:username:token
///   JOIN:channel
///   SEND:channel:text
///   PONG:token
///
/// `flags` is any combination of `m` (moderator), `b` (broadcaster) and
/// `s` (the bot's own message echoed back). The body is the remainder of
/// the line and may itself contain `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<'a> {
    Msg {
        channel: &'a str,
        username: &'a str,
        display: &'a str,
        flags: &'a str,
        body: &'a str,
    },
    Ping {
        token: &'a str,
    },
}

/// Parse a single inbound line. The frame borrows from `line`.
pub fn parse_frame(line: &str) -> Result<Frame<'_>, BotError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let (kind, payload) = line
        .split_once(':')
        .ok_or_else(|| BotError::Parse("missing ':' delimiter".into()))?;

    match kind {
        "MSG" => {
            let mut fields = payload.splitn(5, ':');
            let (Some(channel), Some(username), Some(display), Some(flags), Some(body)) = (
                fields.next(),
                fields.next(),
                fields.next(),
                fields.next(),
                fields.next(),
            ) else {
                return Err(BotError::Parse(
                    "MSG requires channel:username:display:flags:body".into(),
                ));
            };

            if channel.trim().is_empty() {
                return Err(BotError::Parse("empty channel".into()));
            }
            if username.trim().is_empty() {
                return Err(BotError::Parse("empty username".into()));
            }

            Ok(Frame::Msg {
                channel: channel.trim(),
                username: username.trim(),
                display: display.trim(),
                flags,
                body,
            })
        }
        "PING" => Ok(Frame::Ping { token: payload }),
        _ => Err(BotError::Parse(format!("unknown frame: {kind}"))),
    }
}

impl Frame<'_> {
    /// Turn a `MSG` frame into an owned chat event. `None` for other frames.
    pub fn to_event(&self) -> Option<ChatEvent> {
        let Frame::Msg {
            channel,
            username,
            display,
            flags,
            body,
        } = self
        else {
            return None;
        };

        let display = if display.is_empty() { username } else { display };
        Some(ChatEvent {
            channel: ChannelName::new(channel),
            sender: Sender {
                display_name: display.to_string(),
                username: username.to_string(),
                is_moderator: flags.contains('m'),
                is_broadcaster: flags.contains('b'),
            },
            text: body.to_string(),
            is_self: flags.contains('s'),
        })
    }
}

/// Line breaks inside a payload would split the frame in two.
fn one_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

pub fn auth_line(username: &str, token: &str) -> String {
    format!("AUTH:{}:{}\n", one_line(username), one_line(token))
}

pub fn join_line(channel: &ChannelName) -> String {
    format!("JOIN:{}\n", channel.as_str())
}

pub fn send_line(channel: &ChannelName, text: &str) -> String {
    format!("SEND:{}:{}\n", channel.as_str(), one_line(text))
}

pub fn pong_line(token: &str) -> String {
    format!("PONG:{}\n", one_line(token))
}
