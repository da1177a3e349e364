//! Evaluation of lookups against an expected mapping

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::reconciliation::engine::ReconciliationEngine;
use crate::types::*;

const COLUMN_WIDTH: usize = 30;

/// Known-correct links for a fixture, in both directions
///
/// `None` records that the anchor is expected to stay unmatched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectedMapping {
    #[serde(default)]
    pub transaction_to_attachment: BTreeMap<RecordId, Option<RecordId>>,
    #[serde(default)]
    pub attachment_to_transaction: BTreeMap<RecordId, Option<RecordId>>,
}

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub anchor: RecordId,
    pub expected: Option<RecordId>,
    pub found: Option<RecordId>,
    pub passed: bool,
}

/// Results of running both lookup directions over a fixture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport {
    /// `find_attachment` results, one row per expected transaction
    pub attachment_lookups: Vec<ReportRow>,
    /// `find_transaction` results, one row per expected attachment
    pub transaction_lookups: Vec<ReportRow>,
}

impl ReconciliationReport {
    /// Run every lookup named in `expected` and record the outcome
    ///
    /// Ids in the mapping must exist in the record collections.
    pub fn build(
        engine: &ReconciliationEngine,
        transactions: &[Transaction],
        attachments: &[Attachment],
        expected: &ExpectedMapping,
    ) -> ReconcileResult<Self> {
        let transactions_by_id: HashMap<RecordId, &Transaction> =
            transactions.iter().map(|t| (t.id, t)).collect();
        let attachments_by_id: HashMap<RecordId, &Attachment> =
            attachments.iter().map(|a| (a.id, a)).collect();

        let mut attachment_lookups = Vec::with_capacity(expected.transaction_to_attachment.len());
        for (&transaction_id, &expected_id) in &expected.transaction_to_attachment {
            let transaction = lookup(&transactions_by_id, RecordKind::Transaction, transaction_id)?;
            if let Some(id) = expected_id {
                lookup(&attachments_by_id, RecordKind::Attachment, id)?;
            }
            let found = engine
                .find_attachment(transaction, attachments)
                .map(|attachment| attachment.id);
            attachment_lookups.push(ReportRow::new(transaction_id, expected_id, found));
        }

        let mut transaction_lookups = Vec::with_capacity(expected.attachment_to_transaction.len());
        for (&attachment_id, &expected_id) in &expected.attachment_to_transaction {
            let attachment = lookup(&attachments_by_id, RecordKind::Attachment, attachment_id)?;
            if let Some(id) = expected_id {
                lookup(&transactions_by_id, RecordKind::Transaction, id)?;
            }
            let found = engine
                .find_transaction(attachment, transactions)
                .map(|transaction| transaction.id);
            transaction_lookups.push(ReportRow::new(attachment_id, expected_id, found));
        }

        let report = Self {
            attachment_lookups,
            transaction_lookups,
        };
        tracing::info!(
            passed = report.passed_count(),
            total = report.total_count(),
            "reconciliation report built"
        );
        Ok(report)
    }

    pub fn passed_count(&self) -> usize {
        self.rows().filter(|row| row.passed).count()
    }

    pub fn total_count(&self) -> usize {
        self.attachment_lookups.len() + self.transaction_lookups.len()
    }

    pub fn all_passed(&self) -> bool {
        self.rows().all(|row| row.passed)
    }

    /// Rows whose result differs from the expectation
    pub fn failures(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows().filter(|row| !row.passed)
    }

    fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.attachment_lookups
            .iter()
            .chain(self.transaction_lookups.iter())
    }
}

impl ReportRow {
    fn new(anchor: RecordId, expected: Option<RecordId>, found: Option<RecordId>) -> Self {
        Self {
            anchor,
            expected,
            found,
            passed: expected == found,
        }
    }
}

fn lookup<'a, T>(
    index: &HashMap<RecordId, &'a T>,
    kind: RecordKind,
    id: RecordId,
) -> ReconcileResult<&'a T> {
    index
        .get(&id)
        .copied()
        .ok_or(ReconcileError::UnknownRecord { kind, id })
}

fn describe(kind: RecordKind, id: Option<RecordId>) -> String {
    match (kind, id) {
        (_, None) => "∅".to_string(),
        (RecordKind::Transaction, Some(id)) => format!("Transaction (id={id})"),
        (RecordKind::Attachment, Some(id)) => format!("Attachment (id={id})"),
    }
}

fn write_table(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    headers: [&str; 4],
    anchor_kind: RecordKind,
    target_kind: RecordKind,
    rows: &[ReportRow],
) -> fmt::Result {
    writeln!(f, "\n{title}:\n")?;
    writeln!(
        f,
        "{:<w$} {:<w$} {:<w$} {}",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        w = COLUMN_WIDTH
    )?;
    for row in rows {
        writeln!(
            f,
            "{:<w$} {:<w$} {:<w$} {}",
            describe(anchor_kind, Some(row.anchor)),
            describe(target_kind, row.expected),
            describe(target_kind, row.found),
            if row.passed { "✅" } else { "❌" },
            w = COLUMN_WIDTH
        )?;
    }
    Ok(())
}

impl fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(
            f,
            "Find attachments",
            ["Transaction", "Expected Att", "Found Att", "Result"],
            RecordKind::Transaction,
            RecordKind::Attachment,
            &self.attachment_lookups,
        )?;
        write_table(
            f,
            "Find transactions",
            ["Attachment", "Expected Tx", "Found Tx", "Result"],
            RecordKind::Attachment,
            RecordKind::Transaction,
            &self.transaction_lookups,
        )?;
        writeln!(f)
    }
}
