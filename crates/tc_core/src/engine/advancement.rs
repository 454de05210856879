//! Round progression policy.
//!
//! Consulted only when the current round is over and nobody is pending.
//! Resolution always recomputes from stored rounds, so a reloaded contest
//! reaches the same decision as the run that persisted it.

use crate::engine::round::{score_round, ParticipantScore};
use crate::error::{ContestError, Result};
use crate::model::Contest;

/// What the contest needs after a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundDecision {
    /// Seed the next normal round with these participant indexes.
    NormalRound(Vec<usize>),
    /// Seed a tiebreaker restricted to exactly these tied indexes.
    Tiebreaker(Vec<usize>),
    /// The contest is decided.
    Winner(usize),
}

/// Split one finished round's scores into outright advancers and the group
/// still tied at the cutoff.
///
/// Returns `(advancers, tied, slots_left_for_tied)`. When the cutoff group
/// fits exactly, everyone advances and `tied` is empty. Both lists keep the
/// round's roster order.
fn resolve_scores(scores: &[ParticipantScore], slots: usize) -> (Vec<usize>, Vec<usize>, usize) {
    let mut ranked: Vec<u32> = scores.iter().map(|entry| entry.score).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    let cutoff = ranked[slots - 1];

    let above: Vec<usize> =
        scores.iter().filter(|entry| entry.score > cutoff).map(|entry| entry.participant).collect();
    let at_cutoff: Vec<usize> =
        scores.iter().filter(|entry| entry.score == cutoff).map(|entry| entry.participant).collect();

    if above.len() + at_cutoff.len() == slots {
        let mut advancers = above;
        advancers.extend(at_cutoff);
        (advancers, Vec::new(), 0)
    } else {
        let slots_left = slots - above.len();
        (above, at_cutoff, slots_left)
    }
}

/// Decide whether the contest needs another normal round, a tiebreaker, or
/// has a winner.
///
/// The governing round is the last normal round; any tiebreaker rounds after
/// it consume the slots its cutoff tie left open. Ties inside a tiebreaker
/// chain into a further tiebreaker over the still-tied subset.
pub fn decide(contest: &Contest) -> Result<RoundDecision> {
    let rules = &contest.rules;
    let tier = contest
        .normal_round_count()
        .checked_sub(1)
        .ok_or_else(|| ContestError::InvariantViolation("contest has no rounds".to_string()))?;
    let slots = rules.slots_for_tier(tier);

    let governing_start = contest
        .rounds
        .iter()
        .rposition(|round| !round.tiebreaker)
        .ok_or_else(|| ContestError::InvariantViolation("no governing round".to_string()))?;
    let chain = &contest.rounds[governing_start..];

    let mut advancers: Vec<usize> = Vec::new();
    let mut tied: Vec<usize> = Vec::new();
    let mut slots_left = slots;

    for (position, round) in chain.iter().enumerate() {
        if !round.is_over(rules) {
            return Err(ContestError::InvalidState(
                "advancement consulted before the round was over".to_string(),
            ));
        }
        if position > 0 && round.roster != tied {
            return Err(ContestError::InvariantViolation(format!(
                "tiebreaker roster {:?} does not match the tied set {:?}",
                round.roster, tied
            )));
        }
        if slots_left == 0 {
            return Err(ContestError::InvariantViolation(
                "tiebreaker round exists but no slots were left open".to_string(),
            ));
        }
        if slots_left > round.roster.len() {
            return Err(ContestError::InvariantViolation(format!(
                "{} slots contested by a roster of {}",
                slots_left,
                round.roster.len()
            )));
        }

        let scores = score_round(round, rules);
        let (outright, still_tied, left) = resolve_scores(&scores, slots_left);
        advancers.extend(outright);
        tied = still_tied;
        slots_left = left;
    }

    if !tied.is_empty() {
        return Ok(RoundDecision::Tiebreaker(tied));
    }

    // Advancers keep their relative order from the governing round's roster.
    let governing = &contest.rounds[governing_start];
    let ordered: Vec<usize> =
        governing.roster.iter().copied().filter(|index| advancers.contains(index)).collect();
    if ordered.len() != slots {
        return Err(ContestError::InvariantViolation(format!(
            "resolved {} advancers for {} slots",
            ordered.len(),
            slots
        )));
    }

    if rules.is_final_tier(tier) {
        Ok(RoundDecision::Winner(ordered[0]))
    } else {
        Ok(RoundDecision::NormalRound(ordered))
    }
}
