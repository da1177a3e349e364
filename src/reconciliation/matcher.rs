//! Candidate search shared by both lookup directions

use serde::Serialize;

use crate::reconciliation::normalize::normalize_reference;
use crate::reconciliation::scoring::MatchScore;
use crate::traits::Reconcilable;

/// Why a candidate was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchBasis {
    /// Normalized payment references are equal
    ///
    /// `ambiguous` is set when several candidates carried the same reference;
    /// the lowest id was taken, but the input data needs attention.
    Reference { ambiguous: bool },
    /// Amount, date and counterparty signals cleared the threshold
    Signals(MatchScore),
}

/// A selected candidate together with the reason for the link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match<'a, C> {
    pub record: &'a C,
    pub basis: MatchBasis,
}

/// Find the best candidate for `anchor`
///
/// A shared reference is definitive and skips scoring. Otherwise every
/// candidate is scored with `score_candidate`, ineligible ones are dropped and
/// the highest total wins, lowest id first on ties.
pub fn find_best<'a, A, C, F>(anchor: &A, candidates: &'a [C], score_candidate: F) -> Option<Match<'a, C>>
where
    A: Reconcilable,
    C: Reconcilable,
    F: Fn(&C) -> MatchScore,
{
    if let Some(found) = match_by_reference(anchor, candidates) {
        return Some(found);
    }

    let best = candidates
        .iter()
        .map(|candidate| (candidate, score_candidate(candidate)))
        .filter(|(_, score)| score.is_eligible())
        .fold(None, |best: Option<(&'a C, MatchScore)>, (candidate, score)| match best {
            Some((leader, leading)) if !outranks(candidate, &score, leader, &leading) => {
                Some((leader, leading))
            }
            _ => Some((candidate, score)),
        });

    match best {
        Some((record, score)) => {
            tracing::debug!(
                anchor = anchor.id(),
                candidate = record.id(),
                score = score.total(),
                "selected candidate by signals"
            );
            Some(Match {
                record,
                basis: MatchBasis::Signals(score),
            })
        }
        None => {
            tracing::debug!(anchor = anchor.id(), "no candidate cleared the threshold");
            None
        }
    }
}

fn outranks<C: Reconcilable>(
    candidate: &C,
    score: &MatchScore,
    leader: &C,
    leading: &MatchScore,
) -> bool {
    score.total() > leading.total()
        || (score.total() == leading.total() && candidate.id() < leader.id())
}

fn match_by_reference<'a, A, C>(anchor: &A, candidates: &'a [C]) -> Option<Match<'a, C>>
where
    A: Reconcilable,
    C: Reconcilable,
{
    let reference = normalize_reference(anchor.reference())?;

    let sharing: Vec<&'a C> = candidates
        .iter()
        .filter(|candidate| normalize_reference(candidate.reference()).as_ref() == Some(&reference))
        .collect();

    let record = sharing.iter().copied().min_by_key(|candidate| candidate.id())?;
    let ambiguous = sharing.len() > 1;

    if ambiguous {
        let ids: Vec<_> = sharing.iter().map(|candidate| candidate.id()).collect();
        tracing::warn!(
            anchor = anchor.id(),
            reference = %reference,
            candidates = ?ids,
            selected = record.id(),
            "reference shared by several candidates, taking lowest id"
        );
    } else {
        tracing::debug!(
            anchor = anchor.id(),
            candidate = record.id(),
            reference = %reference,
            "matched by reference"
        );
    }

    Some(Match {
        record,
        basis: MatchBasis::Reference { ambiguous },
    })
}
