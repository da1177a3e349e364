//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::utils::fields;

/// Identifier shared by transactions and attachments; ordering drives tie-breaks
pub type RecordId = u64;

/// The two record collections being reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Bank transaction posting
    Transaction,
    /// Invoice, sales invoice or receipt
    Attachment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Transaction => write!(f, "transaction"),
            RecordKind::Attachment => write!(f, "attachment"),
        }
    }
}

/// A bank transaction posting
///
/// `date` and `amount` are `None` when the source value was missing or could
/// not be parsed; the affected signal is then skipped during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: RecordId,
    /// Booking date
    #[serde(default, deserialize_with = "fields::date")]
    pub date: Option<NaiveDate>,
    /// Signed amount; negative for outflows
    #[serde(default, deserialize_with = "fields::amount")]
    pub amount: Option<BigDecimal>,
    /// Counterparty name as recorded by the bank
    #[serde(default, deserialize_with = "fields::text")]
    pub contact: Option<String>,
    /// Payment reference number
    #[serde(default, deserialize_with = "fields::text")]
    pub reference: Option<String>,
}

impl Transaction {
    /// Create a new transaction without contact or reference
    pub fn new(id: RecordId, date: NaiveDate, amount: BigDecimal) -> Self {
        Self {
            id,
            date: Some(date),
            amount: Some(amount),
            contact: None,
            reference: None,
        }
    }

    /// Set the counterparty name
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Set the payment reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Kind of financial attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    /// Purchase invoice received from a supplier
    Invoice,
    /// Invoice issued by the company to a customer
    SalesInvoice,
    /// Receipt for a completed purchase
    Receipt,
}

/// Counterparty fields an attachment may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyRole {
    Issuer,
    Recipient,
    Supplier,
}

impl AttachmentType {
    /// The field holding the counterparty for this kind of attachment
    ///
    /// For a purchase invoice the other party is the issuer, for a sales
    /// invoice it is the recipient, and a receipt names the supplier.
    pub fn counterparty_role(&self) -> CounterpartyRole {
        match self {
            AttachmentType::Invoice => CounterpartyRole::Issuer,
            AttachmentType::SalesInvoice => CounterpartyRole::Recipient,
            AttachmentType::Receipt => CounterpartyRole::Supplier,
        }
    }
}

/// Field block of an attachment; which fields are populated depends on the type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentData {
    #[serde(default, deserialize_with = "fields::text")]
    pub reference: Option<String>,
    /// Gross total; compared by magnitude
    #[serde(default, deserialize_with = "fields::amount")]
    pub total_amount: Option<BigDecimal>,
    #[serde(default, deserialize_with = "fields::date")]
    pub invoicing_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::date")]
    pub receipt_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::text")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub recipient: Option<String>,
    #[serde(default, deserialize_with = "fields::text")]
    pub supplier: Option<String>,
}

/// An invoice, sales invoice or receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier for the attachment
    pub id: RecordId,
    /// Attachment kind
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    /// Extracted fields
    pub data: AttachmentData,
}

impl Attachment {
    /// Create a new attachment with only a total amount
    pub fn new(id: RecordId, kind: AttachmentType, total_amount: BigDecimal) -> Self {
        Self {
            id,
            kind,
            data: AttachmentData {
                total_amount: Some(total_amount),
                ..AttachmentData::default()
            },
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.data.reference = Some(reference.into());
        self
    }

    pub fn with_invoicing_date(mut self, date: NaiveDate) -> Self {
        self.data.invoicing_date = Some(date);
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.data.due_date = Some(date);
        self
    }

    pub fn with_receipt_date(mut self, date: NaiveDate) -> Self {
        self.data.receipt_date = Some(date);
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.data.issuer = Some(issuer.into());
        self
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.data.recipient = Some(recipient.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.data.supplier = Some(supplier.into());
        self
    }

    /// Value of one counterparty field, if populated with non-blank text
    pub fn counterparty(&self, role: CounterpartyRole) -> Option<&str> {
        let value = match role {
            CounterpartyRole::Issuer => &self.data.issuer,
            CounterpartyRole::Recipient => &self.data.recipient,
            CounterpartyRole::Supplier => &self.data.supplier,
        };
        value.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// Every populated counterparty field, in issuer, recipient, supplier order
    ///
    /// The company being reconciled can appear on either side of an invoice,
    /// so matching considers all of them rather than only the type's own role.
    pub fn counterparties(&self) -> Vec<&str> {
        [
            CounterpartyRole::Issuer,
            CounterpartyRole::Recipient,
            CounterpartyRole::Supplier,
        ]
        .into_iter()
        .filter_map(|role| self.counterparty(role))
        .collect()
    }

    /// Counterparty from the field that is relevant for this attachment type
    pub fn primary_counterparty(&self) -> Option<&str> {
        self.counterparty(self.kind.counterparty_role())
    }
}

/// Errors raised by the loading and reporting shell around the matcher
///
/// Lookups themselves never fail; these cover contract violations in the
/// data handed to them.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: RecordKind, id: RecordId },
    #[error("Unknown {kind} id: {id}")]
    UnknownRecord { kind: RecordKind, id: RecordId },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
