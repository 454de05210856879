//! # tc_core - Stepwise Three-Point Contest Simulation Engine
//!
//! This library advances a persisted shooting contest one atomic event at a
//! time: a single shot, a shooter change, or a round resolution. The whole
//! aggregate is written back after every step, so a host (UI timer, batch
//! simulator, test harness) can pause and resume a contest at any point.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same contest)
//! - Rating-weighted shot outcomes with an injected random source
//! - Tiebreaker chains resolved purely from persisted state
//! - JSON API for easy integration with game engine hosts

pub mod api;
pub mod awards;
pub mod engine;
pub mod error;
pub mod model;
pub mod ratings;
pub mod store;

// Re-export main API functions
pub use api::{simulate_contest_json, ContestRequest, ContestResponse, API_SCHEMA_VERSION};
pub use error::{ContestError, Result};

// Re-export engine types
pub use engine::{ContestDriver, RoundDecision, StepEvent};

// Re-export the contest model
pub use model::{Attempt, Contest, ContestCursor, ContestRules, Participant, Round, TurnRecord};

// Re-export collaborator boundaries
pub use awards::{AwardEntry, AwardLedger, AwardRecorder, CONTEST_WINNER_AWARD};
pub use ratings::{RatingProvider, TableRatingProvider};
pub use store::{ContestStore, FileContestStore, MemoryContestStore, StoreError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
