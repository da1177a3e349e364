//! Integration tests for reconciliation-core

use reconciliation_core::{
    find_attachment, find_transaction,
    utils::{validate_records, JsonFixtureSource, MemorySource},
    Attachment, AttachmentType, MatchBasis, ReconciliationEngine, ReconciliationReport,
    RecordSource, Transaction,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

fn fixture_source() -> JsonFixtureSource {
    JsonFixtureSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

fn load_fixture() -> (Vec<Transaction>, Vec<Attachment>) {
    let source = fixture_source();
    let transactions = source.transactions().unwrap();
    let attachments = source.attachments().unwrap();
    validate_records(&transactions, &attachments).unwrap();
    (transactions, attachments)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

#[test]
fn test_fixture_report_matches_expected_mapping() {
    let source = fixture_source();
    let (transactions, attachments) = load_fixture();
    let expected = source.load_expected().unwrap();
    let engine = ReconciliationEngine::with_config(source.load_config().unwrap()).unwrap();

    let report =
        ReconciliationReport::build(&engine, &transactions, &attachments, &expected).unwrap();

    let failures: Vec<_> = report.failures().collect();
    assert!(failures.is_empty(), "unexpected results: {failures:?}\n{report}");
    assert_eq!(report.total_count(), 21);
    assert_eq!(report.passed_count(), 21);
    assert!(report.to_string().contains("Transaction (id=2008)"));
}

#[test]
fn test_batch_lookups_agree_with_expected_mapping() {
    let source = fixture_source();
    let (transactions, attachments) = load_fixture();
    let expected = source.load_expected().unwrap();
    let engine = ReconciliationEngine::new();

    assert_eq!(
        engine.match_transactions(&transactions, &attachments),
        expected.transaction_to_attachment
    );
    assert_eq!(
        engine.match_attachments(&attachments, &transactions),
        expected.attachment_to_transaction
    );
}

#[test]
fn test_fixture_links_are_consistent_in_both_directions() {
    let (transactions, attachments) = load_fixture();

    for transaction in &transactions {
        if let Some(attachment) = find_attachment(transaction, &attachments) {
            let back = find_transaction(attachment, &transactions);
            assert_eq!(
                back.map(|t| t.id),
                Some(transaction.id),
                "attachment {} does not point back to transaction {}",
                attachment.id,
                transaction.id
            );
        }
    }
}

#[test]
fn test_reference_link_explained() {
    let (transactions, attachments) = load_fixture();
    let engine = ReconciliationEngine::new();

    // 2008 paid only part of invoice 3007; the reference still links them.
    let partial_payment = transactions.iter().find(|t| t.id == 2008).unwrap();
    let found = engine
        .explain_attachment(partial_payment, &attachments)
        .unwrap();
    assert_eq!(found.record.id, 3007);
    assert_eq!(found.basis, MatchBasis::Reference { ambiguous: false });

    // 2003 carries "000 123 45", the sales invoice "12345".
    let customer_payment = transactions.iter().find(|t| t.id == 2003).unwrap();
    assert_eq!(
        find_attachment(customer_payment, &attachments).map(|a| a.id),
        Some(3003)
    );
}

#[test]
fn test_reference_equivalence_forces_match() {
    let transaction = Transaction::new(1, date(2020, 1, 1), dec("-1.00"))
        .with_contact("Nobody Relevant")
        .with_reference("5550");
    let attachments = vec![
        Attachment::new(10, AttachmentType::Invoice, dec("1.00"))
            .with_due_date(date(2020, 1, 1))
            .with_issuer("Nobody Relevant"),
        Attachment::new(11, AttachmentType::Invoice, dec("99999.00"))
            .with_due_date(date(2031, 12, 31))
            .with_issuer("Someone Else Entirely")
            .with_reference("0000 5550"),
    ];

    assert_eq!(
        find_attachment(&transaction, &attachments).map(|a| a.id),
        Some(11)
    );
}

#[test]
fn test_ambiguous_reference_is_flagged() {
    let transaction = Transaction::new(1, date(2024, 1, 1), dec("-10")).with_reference("42");
    let attachments = vec![
        Attachment::new(12, AttachmentType::Receipt, dec("10")).with_reference("0042"),
        Attachment::new(11, AttachmentType::Receipt, dec("10")).with_reference("42"),
    ];

    let found = ReconciliationEngine::new()
        .explain_attachment(&transaction, &attachments)
        .unwrap();
    assert_eq!(found.record.id, 11);
    assert_eq!(found.basis, MatchBasis::Reference { ambiguous: true });
}

#[test]
fn test_amount_and_date_boundaries() {
    let invoice = Attachment::new(10, AttachmentType::Invoice, dec("100.00"))
        .with_due_date(date(2024, 3, 1));
    let attachments = vec![invoice];

    let exact_cent = Transaction::new(1, date(2024, 3, 16), dec("-100.01"));
    assert!(find_attachment(&exact_cent, &attachments).is_some());

    let two_cents = Transaction::new(2, date(2024, 3, 1), dec("-100.02"));
    assert!(find_attachment(&two_cents, &attachments).is_none());

    let sixteen_days = Transaction::new(3, date(2024, 3, 17), dec("-100.00"));
    assert!(find_attachment(&sixteen_days, &attachments).is_none());
}

#[test]
fn test_name_overlap_rules_through_lookup() {
    let attachments = vec![Attachment::new(10, AttachmentType::Invoice, dec("80"))
        .with_due_date(date(2024, 5, 1))
        .with_issuer("Acme Trading Group")];

    let paid = |contact: &str| {
        Transaction::new(1, date(2024, 5, 2), dec("-80")).with_contact(contact.to_string())
    };

    assert!(find_attachment(&paid("ACME TRADING"), &attachments).is_some());
    assert!(find_attachment(&paid("Acme Trading Group Oy"), &attachments).is_some());
    assert!(find_attachment(&paid("Acme Logistics"), &attachments).is_none());
}

#[test]
fn test_directions_can_disagree_under_competition() {
    // Both transactions lack a contact and agree with the receipt on amount
    // and date. The receipt picks the lower id, so 2 finds the receipt but
    // the receipt does not find 2.
    let transactions = vec![
        Transaction::new(1, date(2024, 4, 1), dec("-15.00")),
        Transaction::new(2, date(2024, 4, 2), dec("-15.00")),
    ];
    let attachments = vec![Attachment::new(10, AttachmentType::Receipt, dec("15.00"))
        .with_receipt_date(date(2024, 4, 1))
        .with_supplier("Kiosk")];

    assert_eq!(
        find_attachment(&transactions[1], &attachments).map(|a| a.id),
        Some(10)
    );
    assert_eq!(
        find_transaction(&attachments[0], &transactions).map(|t| t.id),
        Some(1)
    );
}

#[test]
fn test_malformed_record_does_not_abort_batch() {
    let transactions: Vec<Transaction> = serde_json::from_str(
        r#"[
            {"id": 1, "date": "31/31/2024", "amount": "-15.00"},
            {"id": 2, "date": "2024-04-01", "amount": "fifteen"},
            {"id": 3, "date": "2024-04-01", "amount": -15.0}
        ]"#,
    )
    .unwrap();
    let attachments = vec![Attachment::new(10, AttachmentType::Receipt, dec("15.00"))
        .with_receipt_date(date(2024, 4, 1))];

    let engine = ReconciliationEngine::new();
    let links = engine.match_transactions(&transactions, &attachments);
    assert_eq!(links.get(&1), Some(&None));
    assert_eq!(links.get(&2), Some(&None));
    assert_eq!(links.get(&3), Some(&Some(10)));
    assert_eq!(
        engine
            .find_transaction(&attachments[0], &transactions)
            .map(|t| t.id),
        Some(3)
    );
}

#[test]
fn test_memory_source_feeds_engine() {
    let mut source = MemorySource::new();
    source.add_transaction(
        Transaction::new(1, date(2024, 2, 10), dec("-64.90")).with_contact("Lumo Energy"),
    );
    source.add_attachment(
        Attachment::new(10, AttachmentType::Invoice, dec("64.90"))
            .with_invoicing_date(date(2024, 1, 27))
            .with_issuer("Lumo Energy Oy"),
    );

    let transactions = source.transactions().unwrap();
    let attachments = source.attachments().unwrap();
    let found = find_attachment(&transactions[0], &attachments);
    assert_eq!(found.map(|a| a.id), Some(10));
}

#[test]
fn test_contact_without_name_tokens_needs_full_score() {
    let attachments = vec![Attachment::new(10, AttachmentType::Receipt, dec("15"))
        .with_receipt_date(date(2024, 4, 1))];

    for contact in ["-", "Oy", "123"] {
        let transaction =
            Transaction::new(1, date(2024, 4, 1), dec("-15")).with_contact(contact);
        assert!(
            find_attachment(&transaction, &attachments).is_none(),
            "contact {contact:?} should not lower the threshold"
        );
    }

    let blank = Transaction::new(2, date(2024, 4, 1), dec("-15")).with_contact("  ");
    assert_eq!(find_attachment(&blank, &attachments).map(|a| a.id), Some(10));
}

#[test]
fn test_thousands_separated_amount_is_absent() {
    let transaction: Transaction = serde_json::from_str(
        r#"{"id": 1, "date": "2024-04-01", "amount": "1,200"}"#,
    )
    .unwrap();
    assert_eq!(transaction.amount, None);

    let attachments = vec![Attachment::new(10, AttachmentType::Receipt, dec("1.20"))
        .with_receipt_date(date(2024, 4, 1))];
    assert!(find_attachment(&transaction, &attachments).is_none());
}
