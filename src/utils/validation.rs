//! Validation utilities for loaded record collections

use std::collections::HashSet;

use crate::traits::Reconcilable;
use crate::types::*;

/// Validate that no two records of one kind share an id
///
/// Tie-breaks order candidates by id, so ids must identify records uniquely.
pub fn validate_unique_ids<R: Reconcilable>(records: &[R], kind: RecordKind) -> ReconcileResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(ReconcileError::DuplicateId {
                kind,
                id: record.id(),
            });
        }
    }
    Ok(())
}

/// Validate both collections before they are handed to the engine
pub fn validate_records(
    transactions: &[Transaction],
    attachments: &[Attachment],
) -> ReconcileResult<()> {
    validate_unique_ids(transactions, RecordKind::Transaction)?;
    validate_unique_ids(attachments, RecordKind::Attachment)?;

    // Missing signal fields are allowed, but worth knowing about.
    let undated = transactions.iter().filter(|t| t.date.is_none()).count();
    let unpriced = transactions.iter().filter(|t| t.amount.is_none()).count()
        + attachments
            .iter()
            .filter(|a| a.data.total_amount.is_none())
            .count();
    if undated > 0 || unpriced > 0 {
        tracing::warn!(undated, unpriced, "records with absent date or amount");
    }

    Ok(())
}
