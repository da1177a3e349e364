//! Matching constants bundled into one overridable configuration

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::reconciliation::normalize::DEFAULT_CORPORATE_SUFFIXES;
use crate::types::{ReconcileError, ReconcileResult};

/// Tunable constants of the matching rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Largest difference in magnitude for two amounts to count as equal
    pub amount_tolerance: BigDecimal,
    /// Largest distance in days between booking date and attachment date
    pub date_window_days: i64,
    /// Shared tokens needed when neither name contains the other
    pub min_common_tokens: usize,
    /// Company-form tokens ignored when comparing names
    pub corporate_suffixes: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: BigDecimal::new(1.into(), 2),
            date_window_days: 15,
            min_common_tokens: 2,
            corporate_suffixes: DEFAULT_CORPORATE_SUFFIXES
                .iter()
                .map(|suffix| suffix.to_string())
                .collect(),
        }
    }
}

impl MatchConfig {
    pub fn with_amount_tolerance(mut self, tolerance: BigDecimal) -> Self {
        self.amount_tolerance = tolerance;
        self
    }

    pub fn with_date_window_days(mut self, days: i64) -> Self {
        self.date_window_days = days;
        self
    }

    pub fn with_min_common_tokens(mut self, tokens: usize) -> Self {
        self.min_common_tokens = tokens;
        self
    }

    pub fn with_corporate_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.corporate_suffixes = suffixes
            .into_iter()
            .map(|suffix| suffix.into().to_lowercase())
            .collect();
        self
    }

    /// Validate the configuration before it is handed to an engine
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.amount_tolerance < BigDecimal::from(0) {
            return Err(ReconcileError::InvalidConfig(format!(
                "amount tolerance cannot be negative: {}",
                self.amount_tolerance
            )));
        }

        if self.date_window_days < 0 {
            return Err(ReconcileError::InvalidConfig(format!(
                "date window cannot be negative: {} days",
                self.date_window_days
            )));
        }

        if self.min_common_tokens == 0 {
            return Err(ReconcileError::InvalidConfig(
                "at least one common name token must be required".to_string(),
            ));
        }

        if let Some(suffix) = self
            .corporate_suffixes
            .iter()
            .find(|suffix| suffix.trim().is_empty() || suffix.chars().any(char::is_uppercase))
        {
            return Err(ReconcileError::InvalidConfig(format!(
                "corporate suffix must be a non-empty lower-case token: {suffix:?}"
            )));
        }

        Ok(())
    }
}
