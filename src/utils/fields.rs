//! Lenient field decoding for fixture records
//!
//! Source exports are noisy: amounts arrive as numbers or strings, references
//! are sometimes numeric, dates occasionally hold garbage. Each decoder here
//! turns a value it cannot interpret into `None` (with a warning) instead of
//! failing the whole file, so one bad record never aborts a batch.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

/// Decode an optional calendar date
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_date))
}

/// Decode an optional decimal amount from a JSON number or string
pub fn amount<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_amount))
}

/// Decode optional free text; numbers are kept as their literal text
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(value = %other, "ignoring non-text field value");
            None
        }
    })
}

pub(crate) fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim(),
        other => {
            tracing::warn!(value = %other, "unparseable date, treating as absent");
            return None;
        }
    };
    if text.is_empty() {
        return None;
    }
    // Timestamps keep only their date part.
    let day = text.split(['T', ' ']).next().unwrap_or(text);
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(day, format).ok());
    if parsed.is_none() {
        tracing::warn!(value = text, "unparseable date, treating as absent");
    }
    parsed
}

pub(crate) fn parse_amount(value: &Value) -> Option<BigDecimal> {
    let literal = match value {
        Value::Null => return None,
        // Parse the number's decimal text so 0.1 stays exactly 0.1.
        Value::Number(n) => n.to_string(),
        Value::String(s) => match decimal_comma(&s.split_whitespace().collect::<String>()) {
            Some(literal) => literal,
            None => {
                tracing::warn!(value = %s, "ambiguous amount separators, treating as absent");
                return None;
            }
        },
        other => {
            tracing::warn!(value = %other, "unparseable amount, treating as absent");
            return None;
        }
    };
    if literal.is_empty() {
        return None;
    }
    match BigDecimal::from_str(&literal) {
        Ok(amount) => Some(amount),
        Err(err) => {
            tracing::warn!(value = %literal, error = %err, "unparseable amount, treating as absent");
            None
        }
    }
}

/// Rewrite a decimal comma as a point.
///
/// A comma counts as the decimal separator only when it is the sole separator
/// and one or two digits follow it. Anything else holding a comma (`"1,200"`,
/// `"1,200.50"`) could be a thousands separator and yields `None`.
fn decimal_comma(literal: &str) -> Option<String> {
    let Some((whole, fraction)) = literal.split_once(',') else {
        return Some(literal.to_string());
    };
    let is_decimal = !whole.contains('.')
        && (1..=2).contains(&fraction.len())
        && fraction.chars().all(|c| c.is_ascii_digit());
    is_decimal.then(|| format!("{whole}.{fraction}"))
}
