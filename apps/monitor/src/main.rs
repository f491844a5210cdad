//! Pumpwatch - pump.fun listing monitor
//!
//! Polls the pump.fun listing feed and relays newly created tokens to a
//! Telegram chat.

mod config;
mod monitor;

use clap::Parser;
use config::{MonitorSettings, TelegramSettings};
use monitor::Monitor;
use pumpwatch_alerts::TelegramNotifier;
use pumpwatch_feed::{ListingClient, DEFAULT_FEED_URL};
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Applies to every outbound request; a hung call must not stall the loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pumpwatch CLI
#[derive(Parser, Debug)]
#[command(name = "pumpwatch")]
#[command(about = "Relays new pump.fun token listings to Telegram", long_about = None)]
struct Args {
    /// Steady-state seconds between feed polls
    #[arg(short, long, default_value_t = 30)]
    interval: u64,

    /// Seconds to back off after a failed iteration
    #[arg(short, long, default_value_t = 60)]
    backoff: u64,

    /// Seconds between consecutive notifications within one batch
    #[arg(short, long, default_value_t = 2)]
    pacing: u64,

    /// Number of most recent listings requested per poll
    #[arg(long, default_value_t = 50)]
    batch_size: u32,

    /// Listing feed base URL
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn settings(&self) -> MonitorSettings {
        MonitorSettings {
            poll_interval_secs: self.interval,
            error_backoff_secs: self.backoff,
            notify_pacing_secs: self.pacing,
            batch_size: self.batch_size,
            feed_url: self.feed_url.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    info!("🚀 Pumpwatch starting...");
    info!("  Poll interval: {}s", args.interval);
    info!("  Error backoff: {}s", args.backoff);
    info!("  Notify pacing: {}s", args.pacing);
    info!("  Batch size: {}", args.batch_size);
    info!("  Feed URL: {}", args.feed_url);

    let telegram = match TelegramSettings::from_env() {
        Ok(telegram) => telegram,
        Err(e) => {
            error!("💥 Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    // One pooled client for the whole process, shared by the feed client and
    // the notifier. Dropped once when main returns, whichever path exits.
    let http_client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            error!("💥 Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let settings = args.settings();
    let feed = ListingClient::new(
        http_client.clone(),
        settings.feed_url.clone(),
        settings.batch_size,
    );
    let notifier = TelegramNotifier::new(http_client, telegram.bot_token, telegram.chat_id);

    let mut monitor = Monitor::new(feed, notifier, settings);
    monitor.announce_start().await;

    info!("Press Ctrl+C to stop...");

    tokio::select! {
        _ = monitor.run() => {}
        _ = tokio::signal::ctrl_c() => {
            warn!("Shutdown signal received");
        }
    }

    let stats = monitor.stats();
    info!("📈 Final Stats:");
    info!("  Iterations: {}", stats.iterations);
    info!("  Tokens processed: {}", stats.tokens_processed);
    info!("  Notifications sent: {}", stats.notifications_sent);

    info!("👋 Pumpwatch stopped");
}
