//! Message delivery via the Telegram Bot API.

use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("telegram API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// Sends formatted messages to a single chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        client: reqwest::Client,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Deliver one message, rendered as HTML with link previews enabled.
    ///
    /// A non-200 response surfaces with the captured body so the caller can
    /// log what the API rejected. The message is never retried here.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE, self.bot_token);
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": false,
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("Telegram message delivered");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Api { status, body })
        }
    }
}
