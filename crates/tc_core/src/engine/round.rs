//! Round state machine.
//!
//! All round mutation goes through these operations so the "current
//! position" stays a checked, explicit value instead of an array-tail
//! convention. Preconditions are enforced with `InvalidState`.

use serde::{Deserialize, Serialize};

use crate::error::{ContestError, Result};
use crate::model::{Attempt, ContestRules, Round, TurnRecord};

/// What one appended outcome did to the open turn record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotProgress {
    /// The current rack still has balls left.
    AttemptOpen,
    /// The rack filled up and the next one was opened.
    RackComplete,
    /// The final rack filled up; the turn record is fully done.
    TurnComplete,
}

/// One roster entry's cumulative score for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantScore {
    pub participant: usize,
    pub score: u32,
}

/// Who shoots next in this round.
///
/// An open (not fully done) turn record keeps its shooter pending; otherwise
/// the next roster entry in line is pending; `None` once the round is over.
pub fn next_pending_participant(round: &Round, rules: &ContestRules) -> Option<usize> {
    if let Some(last) = round.turns.last() {
        if !last.is_fully_done(rules) {
            return Some(last.participant);
        }
    }
    round.roster.get(round.turns.len()).copied()
}

/// Open a new turn record for `participant`, with one empty rack.
pub fn start_turn_record(round: &mut Round, participant: usize, rules: &ContestRules) -> Result<()> {
    if let Some(last) = round.turns.last() {
        if !last.is_fully_done(rules) {
            return Err(ContestError::InvalidState(format!(
                "turn record for participant {} still in progress",
                last.participant
            )));
        }
    }
    let position = round.turns.len();
    match round.roster.get(position) {
        None => Err(ContestError::InvalidState("round is already over".to_string())),
        Some(&expected) if expected != participant => Err(ContestError::InvalidState(format!(
            "expected participant {expected} at position {position}, got {participant}"
        ))),
        Some(_) => {
            round.turns.push(TurnRecord::new(participant));
            Ok(())
        }
    }
}

/// Append one shot outcome to the open turn record's open rack.
///
/// Completing a rack opens the next one unless the rack bound is reached,
/// in which case the turn record is fully done.
pub fn append_attempt_outcome(
    round: &mut Round,
    outcome: bool,
    rules: &ContestRules,
) -> Result<ShotProgress> {
    let turn = round
        .turns
        .last_mut()
        .ok_or_else(|| ContestError::InvalidState("no open turn record".to_string()))?;
    if turn.is_fully_done(rules) {
        return Err(ContestError::InvalidState(format!(
            "turn record for participant {} is already done",
            turn.participant
        )));
    }

    let rack = turn
        .racks
        .last_mut()
        .ok_or_else(|| ContestError::InvalidState("turn record has no open rack".to_string()))?;
    if rack.is_complete(rules) {
        return Err(ContestError::InvalidState(
            "open rack is already complete; next rack was never opened".to_string(),
        ));
    }

    rack.outcomes.push(outcome);
    if !rack.is_complete(rules) {
        return Ok(ShotProgress::AttemptOpen);
    }

    if turn.racks.len() < rules.racks_per_turn {
        turn.racks.push(Attempt::new());
        Ok(ShotProgress::RackComplete)
    } else {
        Ok(ShotProgress::TurnComplete)
    }
}

/// Cumulative score per roster entry, in roster order.
///
/// The last ball of each rack counts 2, earlier balls 1, misses 0. Entries
/// that have not taken a turn yet score 0. Pure recomputation from stored
/// outcomes.
pub fn score_round(round: &Round, rules: &ContestRules) -> Vec<ParticipantScore> {
    round
        .roster
        .iter()
        .map(|&participant| {
            let score = round
                .turns
                .iter()
                .filter(|turn| turn.participant == participant)
                .flat_map(|turn| &turn.racks)
                .flat_map(|rack| rack.outcomes.iter().enumerate())
                .filter(|&(_, &made)| made)
                .map(|(ball, _)| rules.ball_value(ball))
                .sum();
            ParticipantScore { participant, score }
        })
        .collect()
}
