//! Runtime settings.

use pumpwatch_feed::DEFAULT_FEED_URL;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Monitor loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Steady-state seconds between feed polls.
    pub poll_interval_secs: u64,
    /// Seconds to back off after a failed iteration.
    pub error_backoff_secs: u64,
    /// Seconds between consecutive notifications within one batch.
    pub notify_pacing_secs: u64,
    /// Number of most recent listings requested per poll.
    pub batch_size: u32,
    /// Listing feed base URL.
    pub feed_url: String,
    /// Logging level.
    pub log_level: String,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            error_backoff_secs: 60,
            notify_pacing_secs: 2,
            batch_size: 50,
            feed_url: DEFAULT_FEED_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    pub fn notify_pacing(&self) -> Duration {
        Duration::from_secs(self.notify_pacing_secs)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    MissingSecret(&'static str),
}

/// Telegram credentials, read only from the environment.
#[derive(Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramSettings {
    /// Read credentials from TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID.
    /// Both are required; an empty value counts as missing.
    pub fn from_env() -> Result<Self, SettingsError> {
        let bot_token = require_env("TELEGRAM_BOT_TOKEN")?;
        let chat_id = require_env("TELEGRAM_CHAT_ID")?;
        Ok(Self { bot_token, chat_id })
    }
}

fn require_env(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::MissingSecret(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_default() {
        let settings = MonitorSettings::default();
        assert_eq!(settings.poll_interval_secs, 30);
        assert_eq!(settings.error_backoff_secs, 60);
        assert_eq!(settings.notify_pacing_secs, 2);
        assert_eq!(settings.batch_size, 50);
        assert_eq!(settings.feed_url, DEFAULT_FEED_URL);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_duration_accessors() {
        let settings = MonitorSettings::default();
        assert_eq!(settings.poll_interval(), Duration::from_secs(30));
        assert_eq!(settings.error_backoff(), Duration::from_secs(60));
        assert_eq!(settings.notify_pacing(), Duration::from_secs(2));
    }

    #[test]
    fn test_settings_serialization() {
        let settings = MonitorSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: MonitorSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.poll_interval_secs, settings.poll_interval_secs);
        assert_eq!(parsed.feed_url, settings.feed_url);
    }

    #[test]
    fn test_telegram_settings_debug_redacts_token() {
        let settings = TelegramSettings {
            bot_token: "123:secret".to_string(),
            chat_id: "42".to_string(),
        };
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("42"));
    }
}
