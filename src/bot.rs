use std::time::Instant;

use tracing::{debug, info};

use crate::command::{Command, CommandResult};
use crate::gate::COMMAND_PREFIX;
use crate::pipeline::buttify;
use crate::random::RandomSource;
use crate::state::ChannelStore;
use crate::types::{ChatEvent, Outbound};

/// The message-handling core. Owns every channel's state and the random
/// source; the transport feeds it events one at a time and sends back
/// whatever it returns.
pub struct Bot {
    channels: ChannelStore,
    rng: Box<dyn RandomSource + Send>,
}

impl Bot {
    pub fn new(channels: ChannelStore, rng: Box<dyn RandomSource + Send>) -> Self {
        Self { channels, rng }
    }

    pub fn channels(&self) -> &ChannelStore {
        &self.channels
    }

    /// Handle one inbound event, returning the message to send, if any.
    ///
    /// Command replies ignore the enabled flag and the cooldown. A
    /// transformation only goes out when the channel is enabled, the
    /// sender hasn't opted out, the channel isn't cooling down and the
    /// rate roll succeeds; sending one starts the cooldown.
    pub fn handle(&mut self, event: &ChatEvent, now: Instant) -> Option<Outbound> {
        if event.is_self {
            return None;
        }
        let channel = self.channels.get_mut(&event.channel)?;

        if event.text.trim_start().starts_with(COMMAND_PREFIX) {
            let cmd = match Command::parse(&event.text) {
                Ok(cmd) => cmd,
                Err(e) => {
                    debug!(channel = %event.channel, error = %e, "ignoring command");
                    return None;
                }
            };
            info!(channel = %event.channel, user = %event.sender.username, ?cmd, "command");
            return match cmd.execute(&event.sender, channel) {
                CommandResult::Reply(text) => Some(Outbound {
                    channel: event.channel.clone(),
                    text,
                }),
                CommandResult::Silent => None,
            };
        }

        if !channel.enabled
            || channel.is_opted_out(&event.sender.username)
            || channel.is_cooling_down(now)
        {
            return None;
        }
        if self.rng.next_f64() >= channel.rate() {
            return None;
        }

        let text = buttify(&event.text, channel, self.rng.as_mut())?;
        channel.start_cooldown(now);
        debug!(channel = %event.channel, original = %event.text, %text, "buttified");

        Some(Outbound {
            channel: event.channel.clone(),
            text,
        })
    }
}
