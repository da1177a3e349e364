//! Field normalization shared by the scorer and the matcher

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::types::Attachment;

/// Normalized counterparty name: a set of lower-case word tokens
pub type NameTokens = BTreeSet<String>;

/// Company-form suffixes dropped from counterparty names
pub const DEFAULT_CORPORATE_SUFFIXES: [&str; 11] = [
    "oy", "oyj", "ab", "ltd", "llc", "inc", "gmbh", "ky", "tmi", "plc", "corp",
];

/// Normalize a payment reference for equality comparison
///
/// Whitespace is removed, letters are upper-cased and leading zeros are
/// stripped, so `"0000 5550"` and `"5550"` compare equal. A reference made
/// only of zeros becomes `"0"` rather than the empty string.
pub fn normalize_reference(reference: Option<&str>) -> Option<String> {
    let compact: String = reference?
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    if compact.is_empty() {
        return None;
    }
    let stripped = compact.trim_start_matches('0');
    if stripped.is_empty() {
        Some("0".to_string())
    } else {
        Some(stripped.to_string())
    }
}

/// Split a counterparty name into comparable tokens
///
/// Returns `None` when nothing but punctuation or company-form suffixes remain.
pub fn normalize_name<S: AsRef<str>>(name: Option<&str>, suffixes: &[S]) -> Option<NameTokens> {
    let lowered = name?.to_lowercase();
    let tokens: NameTokens = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|token| !token.is_empty())
        .filter(|token| !suffixes.iter().any(|suffix| suffix.as_ref() == *token))
        .map(str::to_string)
        .collect();
    (!tokens.is_empty()).then_some(tokens)
}

/// Whether two normalized names plausibly denote the same party
///
/// Either set containing the other covers exact and abbreviated forms; beyond
/// that at least `min_common_tokens` shared tokens are needed, since a single
/// common word ("trading", "services") proves little.
pub fn names_overlap(a: &NameTokens, b: &NameTokens, min_common_tokens: usize) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.is_subset(b) || b.is_subset(a) || a.intersection(b).count() >= min_common_tokens
}

/// The date an attachment is expected to be paid on
///
/// Preference order: due date, invoicing date, receipt date.
pub fn select_attachment_date(attachment: &Attachment) -> Option<NaiveDate> {
    let data = &attachment.data;
    data.due_date.or(data.invoicing_date).or(data.receipt_date)
}

/// Compare two amounts by magnitude within `tolerance`
pub fn amounts_close(a: &BigDecimal, b: &BigDecimal, tolerance: &BigDecimal) -> bool {
    (a.abs() - b.abs()).abs() <= *tolerance
}

/// Whether both dates are present and at most `window_days` apart
pub fn dates_close(a: Option<NaiveDate>, b: Option<NaiveDate>, window_days: i64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).num_days().abs() <= window_days,
        _ => false,
    }
}
