//! Polling orchestrator for the listing feed.

use chrono::Utc;
use pumpwatch_alerts::{format_listing, TelegramNotifier};
use pumpwatch_core::{SeenSet, TokenRecord};
use pumpwatch_feed::ListingClient;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::MonitorSettings;

/// Loop state: steady polling, or backing off after a failed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Degraded,
}

/// Counters reported in the final-stats block at shutdown.
#[derive(Debug, Default)]
pub struct MonitorStats {
    pub iterations: u64,
    pub tokens_processed: u64,
    pub notifications_sent: u64,
}

/// The single active component: owns the seen set and drives the
/// fetch -> filter -> format -> notify cycle.
pub struct Monitor {
    feed: ListingClient,
    notifier: TelegramNotifier,
    settings: MonitorSettings,
    seen: SeenSet,
    state: MonitorState,
    stats: MonitorStats,
}

impl Monitor {
    pub fn new(feed: ListingClient, notifier: TelegramNotifier, settings: MonitorSettings) -> Self {
        Self {
            feed,
            notifier,
            settings,
            seen: SeenSet::new(),
            state: MonitorState::Running,
            stats: MonitorStats::default(),
        }
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Send the fixed startup notification, tagged with the hostname.
    pub async fn announce_start(&self) {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());
        let message = format!(
            "🤖 <b>{}</b>\nPump.fun token monitor started\nWatching for new token listings...",
            hostname
        );
        if let Err(e) = self.notifier.send(&message).await {
            error!("Failed to send startup notification: {}", e);
        }
    }

    /// Poll until the future is dropped. Cancellation happens at any await
    /// point, so Ctrl+C in the caller interrupts sleeps promptly.
    pub async fn run(&mut self) {
        loop {
            self.stats.iterations += 1;

            match self.feed.fetch_recent().await {
                Ok(batch) => {
                    self.state = MonitorState::Running;
                    self.process_batch(&batch).await;
                    sleep(self.settings.poll_interval()).await;
                }
                Err(e) => {
                    self.state = MonitorState::Degraded;
                    warn!("Feed fetch failed, backing off: {}", e);
                    sleep(self.settings.error_backoff()).await;
                }
            }
        }
    }

    async fn process_batch(&mut self, batch: &[TokenRecord]) {
        if batch.is_empty() {
            warn!("No tokens retrieved from feed");
            return;
        }
        self.stats.tokens_processed += batch.len() as u64;

        for token in select_new(&mut self.seen, batch) {
            let message = format_listing(token, Utc::now());
            match self.notifier.send(&message).await {
                Ok(()) => {
                    self.stats.notifications_sent += 1;
                    info!(mint = token.mint_id(), "Alert sent");
                }
                Err(e) => {
                    error!(mint = token.mint_id(), "Failed to send alert: {}", e);
                }
            }
            // Space out messages within one batch to respect Telegram limits.
            sleep(self.settings.notify_pacing()).await;
        }

        info!(
            "Processed {} tokens, {} total tracked",
            batch.len(),
            self.seen.len()
        );
    }
}

/// Pass through only records whose mint has not been seen, marking each one
/// seen immediately so duplicates inside a single batch collapse too.
fn select_new<'a>(seen: &mut SeenSet, batch: &'a [TokenRecord]) -> Vec<&'a TokenRecord> {
    batch
        .iter()
        .filter(|token| seen.is_new(token.mint_id()))
        .collect()
}
