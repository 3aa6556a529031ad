use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use buttbot::bot::Bot;
use buttbot::config::{self, BotConfig};
use buttbot::error::BotError;
use buttbot::protocol::{auth_line, join_line};
use buttbot::random::OsRandom;
use buttbot::transport::{RelayTransport, run_relay};

#[derive(Parser)]
#[command(name = "buttbot", about = "Replaces the odd word in chat with butt")]
struct Cli {
    /// Bot account name.
    #[arg(long, env = "BUTTBOT_USERNAME", default_value = "")]
    username: String,

    /// Bot account token.
    #[arg(long, env = "BUTTBOT_TOKEN", default_value = "", hide_env_values = true)]
    token: String,

    /// Channels to join, comma separated.
    #[arg(long, env = "BUTTBOT_CHANNELS", value_delimiter = ',')]
    channels: Vec<String>,

    /// Default substitute word.
    #[arg(long, env = "BUTTBOT_WORD", default_value = config::DEFAULT_WORD)]
    word: String,

    /// Default probability of transforming an eligible message.
    #[arg(long, env = "BUTTBOT_RATE", default_value_t = config::DEFAULT_RATE)]
    rate: f64,

    /// Default cap on replaced words per message.
    #[arg(long, env = "BUTTBOT_MAX_REPLACEMENTS", default_value_t = config::DEFAULT_MAX_REPLACEMENTS)]
    max_replacements: usize,

    /// Chat relay address.
    #[arg(long, env = "BUTTBOT_RELAY", default_value = config::DEFAULT_RELAY)]
    relay: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

impl Cli {
    fn to_config(&self) -> Result<BotConfig, BotError> {
        BotConfig::builder()
            .username(&self.username)
            .token(&self.token)
            .channels(&self.channels)
            .word(&self.word)
            .rate(self.rate)
            .max_replacements(self.max_replacements)
            .relay(&self.relay)
            .build()
    }
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), BotError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    let config = cli.to_config().inspect_err(|e| error!("{e}"))?;
    info!(
        username = %config.username,
        channels = config.channels.len(),
        word = %config.word,
        rate = config.rate,
        max = config.max_replacements,
        "starting"
    );

    let stream = TcpStream::connect(&config.relay).await?;
    info!(relay = %config.relay, "connected");
    let (reader, writer) = stream.into_split();

    let relay = Arc::new(RelayTransport::new(writer));
    relay.write_line(&auth_line(&config.username, config.token())).await?;
    for channel in &config.channels {
        relay.write_line(&join_line(channel)).await?;
        info!(%channel, "joined");
    }
    let mut bot = Bot::new(config.channel_store(), Box::new(OsRandom::new()));
    run_relay(BufReader::new(reader), relay, &mut bot).await?;

    info!("relay closed the connection");
    Ok(())
}
