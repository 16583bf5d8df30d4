use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses an amount, rate or hour count typed by the user.
///
/// Handles comma as thousands separator (e.g. `"15,000"`).
/// Empty or whitespace-only input is treated as 0, the way a cleared
/// numeric field reads.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an optional [`Decimal`] for display, using "—" when `None`.
pub fn opt_decimal_display(d: &Option<Decimal>) -> String {
    d.as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}
