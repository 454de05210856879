//! Contest data model.
//!
//! The `Contest` aggregate is the sole persistence root; rounds, turn
//! records and racks are owned transitively and written as a whole after
//! every simulation step.

pub mod contest;
pub mod participant;
pub mod rules;

pub use contest::{Attempt, Contest, ContestCursor, Round, TurnRecord};
pub use participant::Participant;
pub use rules::ContestRules;
