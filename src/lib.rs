//! # Reconciliation Core
//!
//! Links bank transactions to the attachments (invoices, sales invoices,
//! receipts) that support them, in either direction.
//!
//! ## Features
//!
//! - **Reference matching**: payment references compared after removing
//!   whitespace, case and leading zeros
//! - **Signal scoring**: amount, date and counterparty agreement when no
//!   reference links a pair
//! - **Deterministic selection**: thresholds keyed off the transaction contact,
//!   ties broken by lowest id
//! - **Fixture loading**: lenient JSON decoding where malformed dates and
//!   amounts become absent signals instead of errors
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{find_attachment, Attachment, AttachmentType, Transaction};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let paid = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
//! let transaction = Transaction::new(2001, paid, BigDecimal::from(-1200)).with_reference("5550");
//! let attachments = vec![
//!     Attachment::new(3001, AttachmentType::Invoice, BigDecimal::from(1200))
//!         .with_reference("0000 5550"),
//! ];
//!
//! let found = find_attachment(&transaction, &attachments);
//! assert_eq!(found.map(|a| a.id), Some(3001));
//! ```

pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
