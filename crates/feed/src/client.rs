//! Listing feed client.

use crate::error::FeedError;
use pumpwatch_core::TokenRecord;
use reqwest::header;
use serde_json::Value;
use tracing::debug;

/// Default base URL of the listing API.
pub const DEFAULT_FEED_URL: &str = "https://frontend-api.pump.fun";

/// The listing endpoint rejects requests without a browser-like agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Client for the token-listing endpoint.
///
/// Holds a clone of the process-wide `reqwest::Client`; the connection pool
/// is shared with the notifier.
pub struct ListingClient {
    client: reqwest::Client,
    base_url: String,
    batch_size: u32,
}

impl ListingClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, batch_size: u32) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            batch_size,
        }
    }

    /// Fetch the most recently created listings, newest first.
    ///
    /// Returns every record the response carried (deduplication is the
    /// caller's concern). Non-200 statuses, transport failures, and
    /// unparseable bodies surface as `FeedError`; an unexpected but valid
    /// JSON shape degrades to an empty batch instead.
    pub async fn fetch_recent(&self) -> Result<Vec<TokenRecord>, FeedError> {
        let url = format!("{}/coins", self.base_url);
        let limit = self.batch_size.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", limit.as_str()),
                ("offset", "0"),
                ("sort", "created_timestamp"),
                ("order", "DESC"),
            ])
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        Ok(parse_listing(&json))
    }
}

/// Extract token records from a listing response.
///
/// Accepts the two shapes the endpoint has been observed to serve: a bare
/// array of records, or an object with the records under `coins`. Anything
/// else yields an empty batch. Individual records that fail to decode are
/// skipped rather than failing the whole response.
pub fn parse_listing(json: &Value) -> Vec<TokenRecord> {
    let records = if let Some(list) = json.as_array() {
        list
    } else if let Some(list) = json.get("coins").and_then(Value::as_array) {
        list
    } else {
        debug!("Listing response had an unexpected shape, treating as empty");
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping malformed listing entry: {}", e);
                None
            }
        })
        .collect()
}
