//! Traits for record access and loading

use crate::types::*;

/// A record that can take part in a match, on either side
pub trait Reconcilable {
    /// Identifier used for deterministic tie-breaks
    fn id(&self) -> RecordId;

    /// Raw payment reference, if the record carries one
    fn reference(&self) -> Option<&str>;
}

impl Reconcilable for Transaction {
    fn id(&self) -> RecordId {
        self.id
    }

    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl Reconcilable for Attachment {
    fn id(&self) -> RecordId {
        self.id
    }

    fn reference(&self) -> Option<&str> {
        self.data.reference.as_deref()
    }
}

/// Source of the two record collections being reconciled
///
/// This trait keeps the matching core independent of where records come from
/// (fixture files, an accounting export, records built in memory).
pub trait RecordSource {
    /// Load all bank transactions
    fn transactions(&self) -> ReconcileResult<Vec<Transaction>>;

    /// Load all attachments
    fn attachments(&self) -> ReconcileResult<Vec<Attachment>>;
}
