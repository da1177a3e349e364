//! Build a few records in code and explain how each one is matched

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::{
    Attachment, AttachmentType, MatchBasis, ReconciliationEngine, Transaction,
};
use std::str::FromStr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid date");

    let transactions = vec![
        Transaction::new(1, date(2024, 6, 14)?, BigDecimal::from_str("-1200.00")?)
            .with_contact("Jane Doe Design")
            .with_reference("5550"),
        Transaction::new(2, date(2024, 6, 19)?, BigDecimal::from_str("-450.00")?)
            .with_contact("Acme Cleaning"),
        Transaction::new(3, date(2024, 6, 6)?, BigDecimal::from_str("-23.40")?),
        Transaction::new(4, date(2024, 6, 10)?, BigDecimal::from_str("-42.00")?)
            .with_contact("Taxi Turku"),
    ];

    let attachments = vec![
        Attachment::new(10, AttachmentType::Invoice, BigDecimal::from_str("1200.00")?)
            .with_reference("0000 5550")
            .with_due_date(date(2024, 6, 15)?)
            .with_issuer("Jane Doe Design Oy"),
        Attachment::new(11, AttachmentType::Invoice, BigDecimal::from_str("450.00")?)
            .with_due_date(date(2024, 6, 20)?)
            .with_issuer("Acme Cleaning Services Ltd")
            .with_recipient("Example Company Oy"),
        Attachment::new(12, AttachmentType::Receipt, BigDecimal::from_str("23.40")?)
            .with_receipt_date(date(2024, 6, 5)?)
            .with_supplier("Café Aurora"),
        Attachment::new(13, AttachmentType::Receipt, BigDecimal::from_str("42.00")?)
            .with_receipt_date(date(2024, 6, 10)?)
            .with_supplier("Taxi Helsinki"),
    ];

    let engine = ReconciliationEngine::new();

    println!("🔗 Transaction → attachment\n");
    for transaction in &transactions {
        match engine.explain_attachment(transaction, &attachments) {
            Some(found) => println!(
                "  Transaction {} → Attachment {} ({})",
                transaction.id,
                found.record.id,
                describe(&found.basis)
            ),
            None => println!("  Transaction {} → no confident match", transaction.id),
        }
    }

    println!("\n🔗 Attachment → transaction\n");
    for attachment in &attachments {
        match engine.explain_transaction(attachment, &transactions) {
            Some(found) => println!(
                "  Attachment {} → Transaction {} ({})",
                attachment.id,
                found.record.id,
                describe(&found.basis)
            ),
            None => println!("  Attachment {} → no confident match", attachment.id),
        }
    }

    Ok(())
}

fn describe(basis: &MatchBasis) -> String {
    match basis {
        MatchBasis::Reference { ambiguous: false } => "reference".to_string(),
        MatchBasis::Reference { ambiguous: true } => "reference, ambiguous".to_string(),
        MatchBasis::Signals(score) => format!(
            "score {}/{}: amount={} date={} counterparty={}",
            score.total(),
            score.required(),
            score.amount,
            score.date,
            match score.counterparty {
                Some(true) => "yes",
                Some(false) => "no",
                None => "n/a",
            }
        ),
    }
}
