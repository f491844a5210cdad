//! Token listing records as returned by the upstream feed.

use serde::Deserialize;
use serde_json::Value;

/// One entry from the listing feed.
///
/// The feed schema is not owned by this project and drifts; every field is
/// optional and the numeric fields are kept as raw JSON until formatting time
/// because the upstream has served them both as numbers and as strings.
/// Only `mint` matters for correctness; everything else has a display
/// default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRecord {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub mint: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub usd_market_cap: Option<Value>,
    pub price_usd: Option<Value>,
    pub website: Option<String>,
    pub telegram: Option<String>,
    pub twitter: Option<String>,
}

impl TokenRecord {
    /// Identifier used for deduplication; empty when the feed omitted it.
    pub fn mint_id(&self) -> &str {
        self.mint.as_deref().unwrap_or("")
    }
}
