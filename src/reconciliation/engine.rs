//! Directional lookups over the shared matcher

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::reconciliation::config::MatchConfig;
use crate::reconciliation::matcher::{find_best, Match};
use crate::reconciliation::scoring::score;
use crate::types::*;

/// Matches transactions and attachments in both directions
///
/// The engine holds only its configuration; every lookup borrows the records
/// and is free of side effects, so one engine can serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: MatchConfig,
}

impl ReconciliationEngine {
    /// Create an engine with the default matching constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom matching constants
    pub fn with_config(config: MatchConfig) -> ReconcileResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Find the attachment supporting a transaction
    pub fn find_attachment<'a>(
        &self,
        transaction: &Transaction,
        attachments: &'a [Attachment],
    ) -> Option<&'a Attachment> {
        self.explain_attachment(transaction, attachments)
            .map(|found| found.record)
    }

    /// Find the transaction settling an attachment
    pub fn find_transaction<'a>(
        &self,
        attachment: &Attachment,
        transactions: &'a [Transaction],
    ) -> Option<&'a Transaction> {
        self.explain_transaction(attachment, transactions)
            .map(|found| found.record)
    }

    /// Like [`find_attachment`](Self::find_attachment), with the reason for the match
    pub fn explain_attachment<'a>(
        &self,
        transaction: &Transaction,
        attachments: &'a [Attachment],
    ) -> Option<Match<'a, Attachment>> {
        find_best(transaction, attachments, |attachment| {
            score(transaction, attachment, &self.config)
        })
    }

    /// Like [`find_transaction`](Self::find_transaction), with the reason for the match
    ///
    /// Candidates are scored in their transaction role, so the contact
    /// threshold follows each candidate transaction rather than the anchor.
    pub fn explain_transaction<'a>(
        &self,
        attachment: &Attachment,
        transactions: &'a [Transaction],
    ) -> Option<Match<'a, Transaction>> {
        find_best(attachment, transactions, |transaction| {
            score(transaction, attachment, &self.config)
        })
    }

    /// Look up an attachment for every transaction, keyed by transaction id
    pub fn match_transactions(
        &self,
        transactions: &[Transaction],
        attachments: &[Attachment],
    ) -> BTreeMap<RecordId, Option<RecordId>> {
        let lookup = |transaction: &Transaction| {
            let found = self.find_attachment(transaction, attachments);
            (transaction.id, found.map(|attachment| attachment.id))
        };

        #[cfg(feature = "parallel")]
        let links = transactions.par_iter().map(lookup).collect();
        #[cfg(not(feature = "parallel"))]
        let links = transactions.iter().map(lookup).collect();

        links
    }

    /// Look up a transaction for every attachment, keyed by attachment id
    pub fn match_attachments(
        &self,
        attachments: &[Attachment],
        transactions: &[Transaction],
    ) -> BTreeMap<RecordId, Option<RecordId>> {
        let lookup = |attachment: &Attachment| {
            let found = self.find_transaction(attachment, transactions);
            (attachment.id, found.map(|transaction| transaction.id))
        };

        #[cfg(feature = "parallel")]
        let links = attachments.par_iter().map(lookup).collect();
        #[cfg(not(feature = "parallel"))]
        let links = attachments.iter().map(lookup).collect();

        links
    }
}

/// Find the attachment supporting `transaction` using the default constants
pub fn find_attachment<'a>(
    transaction: &Transaction,
    attachments: &'a [Attachment],
) -> Option<&'a Attachment> {
    ReconciliationEngine::new().find_attachment(transaction, attachments)
}

/// Find the transaction settling `attachment` using the default constants
pub fn find_transaction<'a>(
    attachment: &Attachment,
    transactions: &'a [Transaction],
) -> Option<&'a Transaction> {
    ReconciliationEngine::new().find_transaction(attachment, transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::matcher::MatchBasis;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn receipt(id: RecordId, total: &str, on: NaiveDate, supplier: &str) -> Attachment {
        Attachment::new(id, AttachmentType::Receipt, dec(total))
            .with_receipt_date(on)
            .with_supplier(supplier)
    }

    #[test]
    fn test_reference_match_ignores_other_signals() {
        let transaction = Transaction::new(2001, date(2024, 1, 1), dec("-10.00"))
            .with_contact("Somebody Else")
            .with_reference("5550");
        let attachments = vec![
            receipt(3001, "999.00", date(2023, 5, 5), "Acme").with_reference("0000 5550"),
            receipt(3002, "10.00", date(2024, 1, 1), "Somebody Else"),
        ];

        let engine = ReconciliationEngine::new();
        let found = engine.explain_attachment(&transaction, &attachments).unwrap();
        assert_eq!(found.record.id, 3001);
        assert_eq!(found.basis, MatchBasis::Reference { ambiguous: false });

        let reverse = engine.find_transaction(&attachments[0], std::slice::from_ref(&transaction));
        assert_eq!(reverse.map(|t| t.id), Some(2001));
    }

    #[test]
    fn test_threshold_asymmetry() {
        let attachments = vec![receipt(3001, "42.00", date(2024, 6, 10), "Taxi Helsinki")];

        let anonymous = Transaction::new(2001, date(2024, 6, 10), dec("-42.00"));
        assert_eq!(
            find_attachment(&anonymous, &attachments).map(|a| a.id),
            Some(3001)
        );

        let named = anonymous.clone().with_contact("Taxi Turku");
        assert_eq!(find_attachment(&named, &attachments), None);
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let transaction =
            Transaction::new(2001, date(2024, 6, 10), dec("-42.00")).with_contact("Taxi Helsinki");
        let attachments = vec![
            receipt(3009, "42.00", date(2024, 6, 11), "Taxi Helsinki Oy"),
            receipt(3004, "42.00", date(2024, 6, 9), "Taxi Helsinki"),
        ];

        for _ in 0..5 {
            assert_eq!(
                find_attachment(&transaction, &attachments).map(|a| a.id),
                Some(3004)
            );
        }
    }

    #[test]
    fn test_find_transaction_scores_candidates_as_transactions() {
        let attachment = receipt(3001, "42.00", date(2024, 6, 10), "Taxi Helsinki");
        let transactions = vec![
            Transaction::new(2001, date(2024, 6, 10), dec("-42.00")).with_contact("Taxi Turku"),
            Transaction::new(2002, date(2024, 6, 12), dec("-42.00")),
        ];

        // 2001 names a different taxi firm and needs all three signals;
        // 2002 has no contact, so amount and date are enough.
        let found = ReconciliationEngine::new()
            .explain_transaction(&attachment, &transactions)
            .unwrap();
        assert_eq!(found.record.id, 2002);
        assert_eq!(found.basis, MatchBasis::Signals(found_score(&transactions[1], &attachment)));
    }

    fn found_score(transaction: &Transaction, attachment: &Attachment) -> crate::MatchScore {
        score(transaction, attachment, &MatchConfig::default())
    }

    #[test]
    fn test_no_match_is_absent() {
        let transaction = Transaction::new(2001, date(2024, 6, 25), dec("-1850.00"))
            .with_contact("Payroll");
        let attachments = vec![receipt(3001, "42.00", date(2024, 1, 10), "Taxi Helsinki")];
        assert_eq!(find_attachment(&transaction, &attachments), None);
        assert_eq!(find_attachment(&transaction, &[]), None);
    }

    #[test]
    fn test_custom_config_widens_window() {
        let transaction = Transaction::new(2001, date(2024, 6, 30), dec("-42.00"));
        let attachments = vec![receipt(3001, "42.00", date(2024, 6, 10), "Taxi Helsinki")];

        assert_eq!(find_attachment(&transaction, &attachments), None);

        let engine =
            ReconciliationEngine::with_config(MatchConfig::default().with_date_window_days(30))
                .unwrap();
        assert_eq!(
            engine.find_attachment(&transaction, &attachments).map(|a| a.id),
            Some(3001)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result =
            ReconciliationEngine::with_config(MatchConfig::default().with_date_window_days(-5));
        assert!(matches!(result, Err(ReconcileError::InvalidConfig(_))));
    }

    #[test]
    fn test_batch_lookups() {
        let transactions = vec![
            Transaction::new(2001, date(2024, 6, 10), dec("-42.00")),
            Transaction::new(2002, date(2024, 6, 10), dec("-7.00")),
        ];
        let attachments = vec![receipt(3001, "42.00", date(2024, 6, 10), "Taxi Helsinki")];

        let engine = ReconciliationEngine::new();
        let forward = engine.match_transactions(&transactions, &attachments);
        assert_eq!(forward.get(&2001), Some(&Some(3001)));
        assert_eq!(forward.get(&2002), Some(&None));

        let backward = engine.match_attachments(&attachments, &transactions);
        assert_eq!(backward.get(&3001), Some(&Some(2001)));
    }
}
