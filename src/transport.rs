use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::bot::Bot;
use crate::error::BotError;
use crate::protocol::{Frame, parse_frame, pong_line, send_line};
use crate::types::{ChannelName, Outbound};

/// Outbound side of a chat network.
///
/// The future is boxed so the trait stays object safe and the bot can
/// hold an `Arc<dyn ChatTransport>` without knowing the concrete socket.
pub trait ChatTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        channel: &'a ChannelName,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>>;
}

/// Writes relay protocol lines to any async writer (a TCP write half in
/// production, an in-memory pipe in tests).
pub struct RelayTransport<W> {
    writer: Mutex<W>,
}

impl<W> RelayTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Write one already-formatted line and flush it.
    pub async fn write_line(&self, line: &str) -> Result<(), BotError> {
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

impl<W> ChatTransport for RelayTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn send<'a>(
        &'a self,
        channel: &'a ChannelName,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>> {
        Box::pin(async move {
            self.write_line(&send_line(channel, text))
                .await
                .map_err(|e| BotError::Transport(format!("send to {channel} failed: {e}")))
        })
    }
}

/// Fire-and-forget send. Failures are logged and the message is dropped;
/// nothing is retried and the caller never waits.
pub fn dispatch(transport: Arc<dyn ChatTransport>, out: Outbound) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = transport.send(&out.channel, &out.text).await {
            warn!(channel = %out.channel, error = %e, "dropping outbound message");
        }
    })
}

/// Feed every relay line to `bot` until the relay closes the connection.
///
/// Lines are decoded lossily: a frame with invalid UTF-8 is handled with
/// replacement characters instead of ending the loop. Only a failing read
/// on the connection itself is returned as an error.
pub async fn run_relay<R, W>(
    mut reader: R,
    relay: Arc<RelayTransport<W>>,
    bot: &mut Bot,
) -> Result<(), BotError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let transport: Arc<dyn ChatTransport> = relay.clone();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        handle_line(&line, &relay, &transport, bot).await;
    }
}

async fn handle_line<W>(
    line: &str,
    relay: &RelayTransport<W>,
    transport: &Arc<dyn ChatTransport>,
    bot: &mut Bot,
) where
    W: AsyncWrite + Unpin + Send,
{
    let frame = match parse_frame(line) {
        Ok(frame) => frame,
        Err(e) => {
            debug!(error = %e, line = line.trim_end(), "skipping frame");
            return;
        }
    };

    match frame {
        Frame::Ping { token } => {
            if let Err(e) = relay.write_line(&pong_line(token)).await {
                warn!(error = %e, "pong failed");
            }
        }
        Frame::Msg { .. } => {
            let Some(event) = frame.to_event() else {
                return;
            };
            if let Some(out) = bot.handle(&event, Instant::now()) {
                dispatch(transport.clone(), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, BufReader};

    use crate::random::testing::Scripted;
    use crate::state::{ChannelConfig, ChannelStore};

    use super::*;

    struct FailingTransport;

    impl ChatTransport for FailingTransport {
        fn send<'a>(
            &'a self,
            _channel: &'a ChannelName,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<(), BotError>> + Send + 'a>> {
            Box::pin(async { Err(BotError::Transport("relay gone".into())) })
        }
    }

    #[tokio::test]
    async fn relay_transport_writes_send_frames() {
        let (client, mut server) = tokio::io::duplex(1024);
        let transport = Arc::new(RelayTransport::new(client));

        let out = Outbound {
            channel: ChannelName::new("#stream"),
            text: "butt boat".into(),
        };
        dispatch(transport.clone(), out).await.expect("task completes");
        drop(transport);

        let mut written = String::new();
        server.read_to_string(&mut written).await.expect("readable");
        assert_eq!(written, "SEND:stream:butt boat\n");
    }

    #[tokio::test]
    async fn closed_writer_is_a_transport_error() {
        let (client, server) = tokio::io::duplex(64);
        drop(server);
        let transport = RelayTransport::new(client);
        let result = transport.send(&ChannelName::new("stream"), "hello").await;
        assert!(matches!(result, Err(BotError::Transport(_))));
    }

    #[tokio::test]
    async fn failed_dispatch_does_not_panic() {
        let handle = dispatch(
            Arc::new(FailingTransport),
            Outbound {
                channel: ChannelName::new("stream"),
                text: "hello".into(),
            },
        );
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_stop_the_relay() {
        let mut store = ChannelStore::new();
        store.add_channel(ChannelName::new("c"), ChannelConfig::new("butt", 1.0, 1));
        store.add_channel(ChannelName::new("d"), ChannelConfig::new("butt", 1.0, 1));
        let mut bot = Bot::new(store, Box::new(Scripted::default()));

        let (mut relay_in, bot_in) = tokio::io::duplex(1024);
        let (bot_out, mut relay_out) = tokio::io::duplex(1024);
        relay_in
            .write_all(b"PING:a\nMSG:c:u:U::caf\xe9 boat\nnot a frame\nMSG:d:v:V::nice boat\n")
            .await
            .expect("writable");
        drop(relay_in);

        let relay = Arc::new(RelayTransport::new(bot_out));
        run_relay(BufReader::new(bot_in), relay, &mut bot)
            .await
            .expect("relay closes cleanly");

        let mut written = String::new();
        relay_out.read_to_string(&mut written).await.expect("readable");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.first(), Some(&"PONG:a"));
        assert!(lines.contains(&"SEND:c:butt\u{FFFD} boat"), "{written}");
        assert!(lines.contains(&"SEND:d:butt boat"), "{written}");
        assert_eq!(lines.len(), 3);
    }
}
