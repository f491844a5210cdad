//! Listing notification formatting.

use chrono::{DateTime, Utc};
use pumpwatch_core::TokenRecord;
use serde_json::Value;
use thiserror::Error;

/// Descriptions longer than this are cut and marked with an ellipsis.
const DESCRIPTION_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{field} is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },
}

/// Format a listing notification. A record that cannot be rendered yields a
/// visible error message instead; the caller sends that fallback like any
/// other notification.
pub fn format_listing(token: &TokenRecord, detected_at: DateTime<Utc>) -> String {
    match try_format_listing(token, detected_at) {
        Ok(message) => message,
        Err(e) => format!("Error formatting token data: {}", e),
    }
}

/// Render a listing as an HTML Telegram message.
///
/// Missing fields get display defaults; a market cap or price that is present
/// but not convertible to a number is an error, never a silent zero.
pub fn try_format_listing(
    token: &TokenRecord,
    detected_at: DateTime<Utc>,
) -> Result<String, FormatError> {
    let name = token.name.as_deref().unwrap_or("Unknown");
    let symbol = token.symbol.as_deref().unwrap_or("N/A");
    let mint = token.mint.as_deref().unwrap_or("N/A");
    let creator = token.creator.as_deref().unwrap_or("Unknown");
    let description = token
        .description
        .as_deref()
        .unwrap_or("No description available");

    let market_cap = numeric_field(token.usd_market_cap.as_ref(), "usd_market_cap")?;
    let price = numeric_field(token.price_usd.as_ref(), "price_usd")?;

    let market_cap_formatted = if market_cap != 0.0 {
        format!("${}", group_thousands(market_cap))
    } else {
        "N/A".to_string()
    };
    let price_formatted = if price != 0.0 {
        format!("${:.8}", price)
    } else {
        "N/A".to_string()
    };

    let mut message = format!(
        "🚀 <b>NEW TOKEN LISTED ON PUMP.FUN</b>\n\n\
         💎 <b>Name:</b> {name}\n\
         🎯 <b>Symbol:</b> ${symbol}\n\
         🔑 <b>Contract:</b> <code>{mint}</code>\n\
         👤 <b>Creator:</b> <code>{creator}</code>\n\n\
         💰 <b>Price:</b> {price_formatted}\n\
         📊 <b>Market Cap:</b> {market_cap_formatted}\n\n\
         📝 <b>Description:</b>\n{description}\n\n\
         🔗 <b>Links:</b>\n\
         • Pump.fun: https://pump.fun/{mint}\n\
         • DEXScreener: https://dexscreener.com/solana/{mint}\n\
         • Birdeye: https://birdeye.so/token/{mint}\n",
        description = truncate_description(description),
    );

    // Social links only when present, always website -> twitter -> telegram.
    if let Some(website) = token.website.as_deref().filter(|s| !s.is_empty()) {
        message.push_str(&format!("• Website: {}\n", website));
    }
    if let Some(twitter) = token.twitter.as_deref().filter(|s| !s.is_empty()) {
        message.push_str(&format!("• Twitter: {}\n", twitter));
    }
    if let Some(telegram) = token.telegram.as_deref().filter(|s| !s.is_empty()) {
        message.push_str(&format!("• Telegram: {}\n", telegram));
    }

    message.push_str(&format!(
        "\n⏰ <b>Detected at:</b> {}",
        detected_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    Ok(message)
}

/// Read a numeric field that the feed serves as a number, a string, null,
/// or not at all. Absent, null, and empty-string values count as zero;
/// anything else that fails conversion is an error.
fn numeric_field(value: Option<&Value>, field: &'static str) -> Result<f64, FormatError> {
    let Some(value) = value else {
        return Ok(0.0);
    };
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n.as_f64().ok_or_else(|| FormatError::NotNumeric {
            field,
            value: value.to_string(),
        }),
        Value::String(s) if s.is_empty() => Ok(0.0),
        Value::String(s) => s.parse::<f64>().map_err(|_| FormatError::NotNumeric {
            field,
            value: s.clone(),
        }),
        other => Err(FormatError::NotNumeric {
            field,
            value: other.to_string(),
        }),
    }
}

/// Thousands-grouped rendering with two decimal places, e.g. 1234567.5
/// becomes "1,234,567.50".
fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let Some((int_part, frac_part)) = formatted.split_once('.') else {
        return formatted;
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let truncated: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", truncated)
    } else {
        description.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: serde_json::Value) -> TokenRecord {
        serde_json::from_value(value).unwrap()
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    /// Pull the rendered description out of a full message.
    fn description_segment(message: &str) -> &str {
        let start = message.find("📝 <b>Description:</b>\n").unwrap()
            + "📝 <b>Description:</b>\n".len();
        let end = message[start..].find("\n\n🔗").unwrap();
        &message[start..start + end]
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let message = try_format_listing(&record(json!({})), timestamp()).unwrap();

        assert!(message.contains("💎 <b>Name:</b> Unknown"));
        assert!(message.contains("🎯 <b>Symbol:</b> $N/A"));
        assert!(message.contains("🔑 <b>Contract:</b> <code>N/A</code>"));
        assert!(message.contains("👤 <b>Creator:</b> <code>Unknown</code>"));
        assert!(message.contains("💰 <b>Price:</b> N/A"));
        assert!(message.contains("📊 <b>Market Cap:</b> N/A"));
        assert!(message.contains("📝 <b>Description:</b>\nNo description available"));
        assert!(message.contains("⏰ <b>Detected at:</b> 2024-05-01 12:30:00 UTC"));
    }

    #[test]
    fn test_derived_links_use_the_mint() {
        let message =
            try_format_listing(&record(json!({"mint": "MINT1"})), timestamp()).unwrap();

        assert!(message.contains("• Pump.fun: https://pump.fun/MINT1"));
        assert!(message.contains("• DEXScreener: https://dexscreener.com/solana/MINT1"));
        assert!(message.contains("• Birdeye: https://birdeye.so/token/MINT1"));
    }

    #[test]
    fn test_market_cap_grouped_two_decimals() {
        let message = try_format_listing(
            &record(json!({"usd_market_cap": 1234567.5})),
            timestamp(),
        )
        .unwrap();

        assert!(message.contains("📊 <b>Market Cap:</b> $1,234,567.50"));
    }

    #[test]
    fn test_zero_market_cap_is_not_available() {
        let message =
            try_format_listing(&record(json!({"usd_market_cap": 0})), timestamp()).unwrap();

        assert!(message.contains("📊 <b>Market Cap:</b> N/A"));
    }

    #[test]
    fn test_price_eight_decimals_accepts_string_values() {
        let message =
            try_format_listing(&record(json!({"price_usd": "0.000001"})), timestamp()).unwrap();

        assert!(message.contains("💰 <b>Price:</b> $0.00000100"));
    }

    #[test]
    fn test_null_and_empty_numerics_are_not_available() {
        let message = try_format_listing(
            &record(json!({"price_usd": null, "usd_market_cap": ""})),
            timestamp(),
        )
        .unwrap();

        assert!(message.contains("💰 <b>Price:</b> N/A"));
        assert!(message.contains("📊 <b>Market Cap:</b> N/A"));
    }

    #[test]
    fn test_non_numeric_price_is_an_error_not_zero() {
        let result = try_format_listing(&record(json!({"price_usd": "soon"})), timestamp());
        assert!(result.is_err());

        let fallback = format_listing(&record(json!({"price_usd": "soon"})), timestamp());
        assert_eq!(
            fallback,
            "Error formatting token data: price_usd is not numeric: soon"
        );
    }

    #[test]
    fn test_non_numeric_market_cap_is_an_error() {
        let result = try_format_listing(
            &record(json!({"usd_market_cap": {"usd": 5.0}})),
            timestamp(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_long_description_truncated_with_marker() {
        let long = "x".repeat(250);
        let message =
            try_format_listing(&record(json!({ "description": long })), timestamp()).unwrap();

        let expected = format!("{}...", "x".repeat(200));
        assert_eq!(description_segment(&message), expected);
    }

    #[test]
    fn test_short_description_unchanged() {
        let short = "y".repeat(150);
        let message =
            try_format_listing(&record(json!({ "description": short })), timestamp()).unwrap();

        assert_eq!(description_segment(&message), "y".repeat(150));
    }

    #[test]
    fn test_social_links_in_fixed_order() {
        let message = try_format_listing(
            &record(json!({
                "telegram": "https://t.me/x",
                "twitter": "https://x.com/x",
                "website": "https://example.com"
            })),
            timestamp(),
        )
        .unwrap();

        let website = message.find("• Website:").unwrap();
        let twitter = message.find("• Twitter:").unwrap();
        let telegram = message.find("• Telegram:").unwrap();
        assert!(website < twitter);
        assert!(twitter < telegram);
    }

    #[test]
    fn test_empty_social_links_omitted() {
        let message = try_format_listing(
            &record(json!({"website": "", "twitter": "https://x.com/x"})),
            timestamp(),
        )
        .unwrap();

        assert!(!message.contains("• Website:"));
        assert!(message.contains("• Twitter: https://x.com/x"));
        assert!(!message.contains("• Telegram:"));
    }

    #[test]
    fn test_formatting_is_deterministic_for_a_fixed_instant() {
        let token = record(json!({
            "name": "Repeat",
            "mint": "SAME",
            "usd_market_cap": 42.0,
            "price_usd": 0.5
        }));

        let first = try_format_listing(&token, timestamp()).unwrap();
        let second = try_format_listing(&token, timestamp()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0.00");
        assert_eq!(group_thousands(999.9), "999.90");
        assert_eq!(group_thousands(1000.0), "1,000.00");
        assert_eq!(group_thousands(1234567.5), "1,234,567.50");
    }
}
