//! Contest driver: one atomic simulation step at a time.
//!
//! Each call performs exactly one micro-event — a shot, a bookkeeping
//! transition, or a round resolution — then persists the whole aggregate.
//! The contest can be paused and resumed at any step boundary; everything
//! the driver needs is recomputed from the persisted state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::awards::{current_timestamp_ms, AwardEntry, AwardRecorder, CONTEST_WINNER_AWARD};
use crate::engine::advancement::{decide, RoundDecision};
use crate::engine::round::{
    append_attempt_outcome, next_pending_participant, start_turn_record, ShotProgress,
};
use crate::engine::sampler::sample_shot;
use crate::error::{ContestError, Result};
use crate::model::{Contest, Round};
use crate::ratings::RatingProvider;
use crate::store::{ContestStore, StoreError};

/// Five-way classification of what a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepEvent {
    /// One shot was drawn, or the next shooter's turn was opened.
    Shot,
    /// A rack was finished and the next one opened.
    RackComplete,
    /// A shooter finished their final rack.
    TurnComplete,
    /// The round resolved into a new round (normal or tiebreaker).
    RoundComplete,
    /// The contest is decided; the winner's award is recorded.
    ContestComplete,
}

// Per-contest write locks. Concurrent steps on the same contest id are
// read-modify-write with no optimistic check, so they must serialize;
// distinct ids proceed independently.
static CONTEST_LOCKS: Lazy<Mutex<HashMap<u64, Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn contest_lock(contest_id: u64) -> Arc<Mutex<()>> {
    let mut locks = CONTEST_LOCKS.lock().expect("contest lock registry poisoned");
    locks.entry(contest_id).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
}

/// Orchestrates one contest step against the injected collaborators.
pub struct ContestDriver<S, P, A, R> {
    store: S,
    ratings: P,
    awards: A,
    rng: R,
}

impl<S, P, A> ContestDriver<S, P, A, ChaCha8Rng>
where
    S: ContestStore,
    P: RatingProvider,
    A: AwardRecorder,
{
    /// Driver with a deterministic seeded generator (same seed, same
    /// contest history).
    pub fn seeded(store: S, ratings: P, awards: A, seed: u64) -> Self {
        Self::new(store, ratings, awards, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<S, P, A, R> ContestDriver<S, P, A, R>
where
    S: ContestStore,
    P: RatingProvider,
    A: AwardRecorder,
    R: Rng,
{
    pub fn new(store: S, ratings: P, awards: A, rng: R) -> Self {
        Self { store, ratings, awards, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn awards(&self) -> &A {
        &self.awards
    }

    /// Create and persist a fresh contest under `contest_id`.
    pub fn init_contest(&mut self, contest_id: u64, contest: Contest) -> Result<()> {
        let lock = contest_lock(contest_id);
        let _guard = lock.lock().expect("contest lock poisoned");

        self.store.save(contest_id, &contest)?;
        log::info!(
            "Contest {} initialized: season {}, {} shooters",
            contest_id,
            contest.season,
            contest.participants.len()
        );
        Ok(())
    }

    /// Advance the contest by exactly one event.
    ///
    /// Load, mutate, persist — serialized per contest id. A step on a
    /// decided contest is an idempotent no-op returning `ContestComplete`
    /// without writing.
    pub fn advance_one_event(&mut self, contest_id: u64) -> Result<StepEvent> {
        let lock = contest_lock(contest_id);
        let _guard = lock.lock().expect("contest lock poisoned");

        let mut contest = match self.store.load(contest_id) {
            Ok(contest) => contest,
            Err(StoreError::NotFound { .. }) => {
                return Err(ContestError::NotFound(format!("contest {contest_id}")))
            }
            Err(err) => return Err(err.into()),
        };

        if contest.is_over() {
            return Ok(StepEvent::ContestComplete);
        }

        if contest.participants.is_empty() {
            return Err(ContestError::InvariantViolation(format!(
                "contest {contest_id} has an empty roster"
            )));
        }

        let event = self.step(contest_id, &mut contest)?;
        self.store.save(contest_id, &contest)?;
        Ok(event)
    }

    /// Keep stepping until the contest is decided; returns every event in
    /// order, ending with `ContestComplete`.
    ///
    /// Capped so a degenerate format (e.g. every shooter rated 100, tying
    /// every tiebreaker) cannot spin forever.
    pub fn run_to_completion(&mut self, contest_id: u64) -> Result<Vec<StepEvent>> {
        const MAX_STEPS: usize = 100_000;

        let mut events = Vec::new();
        for _ in 0..MAX_STEPS {
            let event = self.advance_one_event(contest_id)?;
            events.push(event);
            if event == StepEvent::ContestComplete {
                return Ok(events);
            }
        }
        Err(ContestError::InvalidState(format!(
            "contest {contest_id} undecided after {MAX_STEPS} steps"
        )))
    }

    fn step(&mut self, contest_id: u64, contest: &mut Contest) -> Result<StepEvent> {
        let rules = contest.rules.clone();
        let round = contest
            .current_round()
            .ok_or_else(|| ContestError::InvariantViolation("contest has no rounds".to_string()))?;

        match next_pending_participant(round, &rules) {
            // Round boundary: resolve it into a new round or a winner.
            None => self.resolve_round(contest_id, contest),

            Some(index) => {
                let open_turn = round.turns.last().is_some_and(|turn| !turn.is_fully_done(&rules));
                if open_turn {
                    // Rating lookup happens before any mutation, so a miss
                    // leaves the persisted state untouched.
                    let player = contest.participants.get(index).cloned().ok_or_else(|| {
                        ContestError::InvariantViolation(format!(
                            "pending participant {index} has no roster entry"
                        ))
                    })?;
                    let rating = self.ratings.rating(player.player_id).ok_or_else(|| {
                        ContestError::NotFound(format!("no rating for player {}", player.player_id))
                    })?;

                    let made = sample_shot(rating, &mut self.rng);
                    let round = contest.current_round_mut().ok_or_else(|| {
                        ContestError::InvariantViolation("contest has no rounds".to_string())
                    })?;
                    match append_attempt_outcome(round, made, &rules)? {
                        ShotProgress::AttemptOpen => Ok(StepEvent::Shot),
                        ShotProgress::RackComplete => Ok(StepEvent::RackComplete),
                        ShotProgress::TurnComplete => Ok(StepEvent::TurnComplete),
                    }
                } else {
                    // Next shooter steps up; no outcome is recorded.
                    let round = contest.current_round_mut().ok_or_else(|| {
                        ContestError::InvariantViolation("contest has no rounds".to_string())
                    })?;
                    start_turn_record(round, index, &rules)?;
                    Ok(StepEvent::Shot)
                }
            }
        }
    }

    fn resolve_round(&mut self, contest_id: u64, contest: &mut Contest) -> Result<StepEvent> {
        match decide(contest)? {
            RoundDecision::NormalRound(roster) => {
                log::debug!("Contest {}: next round with {:?}", contest_id, roster);
                contest.rounds.push(Round::new(roster, false));
                Ok(StepEvent::RoundComplete)
            }
            RoundDecision::Tiebreaker(roster) => {
                log::debug!("Contest {}: tiebreaker among {:?}", contest_id, roster);
                contest.rounds.push(Round::new(roster, true));
                Ok(StepEvent::RoundComplete)
            }
            RoundDecision::Winner(index) => {
                let player = contest.participants.get(index).cloned().ok_or_else(|| {
                    ContestError::InvariantViolation(format!(
                        "winner index {index} has no roster entry"
                    ))
                })?;
                contest.winner = Some(index);
                self.awards.record(AwardEntry {
                    player_id: player.player_id,
                    team_id: player.team_id,
                    player_name: player.name.clone(),
                    contest_id,
                    season: contest.season,
                    award: CONTEST_WINNER_AWARD.to_string(),
                    recorded_at: current_timestamp_ms(),
                })?;
                log::info!("Contest {} won by {} (index {})", contest_id, player.name, index);
                Ok(StepEvent::ContestComplete)
            }
        }
    }
}
