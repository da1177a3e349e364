//! In-memory record source for tests and embedding

use crate::traits::*;
use crate::types::*;

/// Record source backed by two owned vectors
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    transactions: Vec<Transaction>,
    attachments: Vec<Attachment>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from existing collections
    pub fn from_records(transactions: Vec<Transaction>, attachments: Vec<Attachment>) -> Self {
        Self {
            transactions,
            attachments,
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Clear all records
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.attachments.clear();
    }
}

impl RecordSource for MemorySource {
    fn transactions(&self) -> ReconcileResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn attachments(&self) -> ReconcileResult<Vec<Attachment>> {
        Ok(self.attachments.clone())
    }
}
