//! Event-driven contest simulation engine.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `sampler` | Rating-weighted shot outcome draws |
//! | `round` | Round state machine: pending shooter, turn records, scoring |
//! | `advancement` | Round-over policy: next round, tiebreaker, or winner |
//! | `driver` | One atomic step: load, mutate, persist, classify |

pub mod advancement;
pub mod driver;
pub mod round;
pub mod sampler;

pub use advancement::{decide, RoundDecision};
pub use driver::{ContestDriver, StepEvent};
pub use round::{
    append_attempt_outcome, next_pending_participant, score_round, start_turn_record,
    ParticipantScore, ShotProgress,
};
pub use sampler::sample_shot;
