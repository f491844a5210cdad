//! Error types for feed operations.

use thiserror::Error;

/// Errors that can occur while fetching the listing feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("listing request failed: {0}")]
    Request(String),

    #[error("listing endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse listing response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::Parse(err.to_string())
        } else {
            FeedError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(err.to_string())
    }
}
