//! Signal scoring for a single transaction/attachment pair

use serde::{Deserialize, Serialize};

use crate::reconciliation::config::MatchConfig;
use crate::reconciliation::normalize::{
    amounts_close, dates_close, names_overlap, normalize_name, select_attachment_date,
};
use crate::types::{Attachment, Transaction};

/// Score needed when the transaction names its counterparty
pub const MIN_SCORE_WITH_CONTACT: u8 = 3;
/// Score needed when the transaction has no contact
pub const MIN_SCORE_WITHOUT_CONTACT: u8 = 2;

/// Outcome of each corroborating signal for one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Amounts agree in magnitude within tolerance
    pub amount: bool,
    /// Booking date is within the window of the attachment date
    pub date: bool,
    /// Contact overlaps a counterparty; `None` when the transaction has no contact.
    /// A contact with no name tokens left after normalization never overlaps.
    pub counterparty: Option<bool>,
}

impl MatchScore {
    /// Number of signals that agree (0-3)
    pub fn total(&self) -> u8 {
        u8::from(self.amount) + u8::from(self.date) + u8::from(self.counterparty == Some(true))
    }

    /// Minimum total for this pair to be eligible
    pub fn required(&self) -> u8 {
        if self.counterparty.is_some() {
            MIN_SCORE_WITH_CONTACT
        } else {
            MIN_SCORE_WITHOUT_CONTACT
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.total() >= self.required()
    }
}

/// Evaluate amount, date and counterparty agreement for a pair
///
/// The arguments are role-typed, so both lookup directions score a given pair
/// identically.
pub fn score(transaction: &Transaction, attachment: &Attachment, config: &MatchConfig) -> MatchScore {
    let amount = match (&transaction.amount, &attachment.data.total_amount) {
        (Some(paid), Some(billed)) => amounts_close(paid, billed, &config.amount_tolerance),
        _ => false,
    };

    let date = dates_close(
        transaction.date,
        select_attachment_date(attachment),
        config.date_window_days,
    );

    let contact = transaction
        .contact
        .as_deref()
        .filter(|contact| !contact.trim().is_empty());
    let counterparty = contact.map(|contact| {
        normalize_name(Some(contact), &config.corporate_suffixes).is_some_and(|contact| {
            attachment
                .counterparties()
                .into_iter()
                .filter_map(|name| normalize_name(Some(name), &config.corporate_suffixes))
                .any(|name| names_overlap(&contact, &name, config.min_common_tokens))
        })
    });

    MatchScore {
        amount,
        date,
        counterparty,
    }
}
