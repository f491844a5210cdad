//! HTTP client for the pump.fun token-listing feed.
//!
//! The feed is polled, never streamed: one GET per iteration requesting the
//! most recently created listings, parsed defensively because the upstream
//! response shape is unverified.

pub mod client;
pub mod error;

pub use client::{parse_listing, ListingClient, DEFAULT_FEED_URL};
pub use error::FeedError;
