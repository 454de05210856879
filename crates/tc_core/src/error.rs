use thiserror::Error;

use crate::store::StoreError;

/// Engine-level error taxonomy.
///
/// Every variant aborts the current simulation step before anything is
/// persisted. The engine never retries on its own; the host decides whether
/// to re-invoke after fixing the cause.
#[derive(Error, Debug)]
pub enum ContestError {
    /// Missing contest or rating. The caller must supply valid identifiers.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A state-machine operation was invoked with its preconditions violated.
    /// Always an engine bug, surfaced and never recovered.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Persisted state is internally inconsistent (empty roster, roster
    /// mismatch in a tiebreaker chain). Fatal, never silently repaired.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ContestError>;
