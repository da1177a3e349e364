//! Reconciliation of bank transactions against attachments
//!
//! A payment reference shared by both records is a definitive link. Without
//! one, a pair is judged on three signals: amount, date and counterparty
//! name. See [`scoring::MatchScore`] for the threshold rules and
//! [`matcher::find_best`] for candidate selection.

pub mod config;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod scoring;

pub use config::*;
pub use engine::*;
pub use matcher::{Match, MatchBasis};
pub use normalize::*;
pub use report::*;
pub use scoring::*;
