//! Telegram alerting for new token listings.
//!
//! This crate provides:
//! - HTML message formatting for listing notifications
//! - Message delivery via the Telegram Bot API

pub mod format;
pub mod telegram;

pub use format::{format_listing, try_format_listing, FormatError};
pub use telegram::{NotifyError, TelegramNotifier};
