//! JSON fixture loading
//!
//! A fixture directory holds `transactions.json` and `attachments.json`, each
//! a JSON array, plus an optional `expected.json` mapping and an optional
//! `config.json` with matching constants.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::reconciliation::{ExpectedMapping, MatchConfig};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_unique_ids;

pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const ATTACHMENTS_FILE: &str = "attachments.json";
pub const EXPECTED_FILE: &str = "expected.json";
pub const CONFIG_FILE: &str = "config.json";

/// Record source reading JSON files from one directory
#[derive(Debug, Clone)]
pub struct JsonFixtureSource {
    dir: PathBuf,
}

impl JsonFixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the expected links used to evaluate a run
    pub fn load_expected(&self) -> ReconcileResult<ExpectedMapping> {
        read_json(&self.dir.join(EXPECTED_FILE))
    }

    /// Load matching constants, falling back to defaults when no file exists
    pub fn load_config(&self) -> ReconcileResult<MatchConfig> {
        let path = self.dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(MatchConfig::default());
        }
        let config: MatchConfig = read_json(&path)?;
        config.validate()?;
        Ok(config)
    }
}

impl RecordSource for JsonFixtureSource {
    fn transactions(&self) -> ReconcileResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = read_json(&self.dir.join(TRANSACTIONS_FILE))?;
        validate_unique_ids(&transactions, RecordKind::Transaction)?;
        tracing::debug!(count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }

    fn attachments(&self) -> ReconcileResult<Vec<Attachment>> {
        let attachments: Vec<Attachment> = read_json(&self.dir.join(ATTACHMENTS_FILE))?;
        validate_unique_ids(&attachments, RecordKind::Attachment)?;
        tracing::debug!(count = attachments.len(), "loaded attachments");
        Ok(attachments)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ReconcileResult<T> {
    let contents = fs::read_to_string(path).map_err(|source| ReconcileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ReconcileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
