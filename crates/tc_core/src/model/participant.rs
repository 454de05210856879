use serde::{Deserialize, Serialize};

/// One contest entrant.
///
/// The roster is fixed when the contest is created; entrants are addressed
/// everywhere else by their index into `Contest::participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable player id used for rating lookups and award records.
    pub player_id: u64,
    /// Team the entrant represents.
    pub team_id: u64,
    /// Display name for reports and award records.
    pub name: String,
}

impl Participant {
    pub fn new(player_id: u64, team_id: u64, name: impl Into<String>) -> Self {
        Self { player_id, team_id, name: name.into() }
    }
}
