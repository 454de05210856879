//! Permanent achievement recording.
//!
//! The driver invokes the recorder exactly once, on the transition into the
//! terminal state; the `winner` field already being set guards repeats.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The label attached to the contest winner's achievement.
pub const CONTEST_WINNER_AWARD: &str = "Three-Point Contest Winner";

/// One recorded achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardEntry {
    pub player_id: u64,
    pub team_id: u64,
    pub player_name: String,
    pub contest_id: u64,
    pub season: u16,
    pub award: String,
    /// Unix milliseconds.
    pub recorded_at: u64,
}

/// Records permanent achievements for contest winners.
///
/// Must complete (or be durably queued) before the driver's step returns.
pub trait AwardRecorder {
    fn record(&mut self, entry: AwardEntry) -> Result<()>;
}

/// In-memory ledger implementation for hosts and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwardLedger {
    entries: Vec<AwardEntry>,
}

impl AwardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AwardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AwardRecorder for AwardLedger {
    fn record(&mut self, entry: AwardEntry) -> Result<()> {
        log::info!(
            "Award recorded: {} for {} (season {})",
            entry.award,
            entry.player_name,
            entry.season
        );
        self.entries.push(entry);
        Ok(())
    }
}

pub fn current_timestamp_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_keeps_entries_in_order() {
        let mut ledger = AwardLedger::new();
        for contest_id in 0..3u64 {
            ledger
                .record(AwardEntry {
                    player_id: 100 + contest_id,
                    team_id: 1,
                    player_name: format!("Winner {contest_id}"),
                    contest_id,
                    season: 2027,
                    award: CONTEST_WINNER_AWARD.to_string(),
                    recorded_at: 1_700_000_000_000 + contest_id,
                })
                .unwrap();
        }

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.entries()[0].player_id, 100);
        assert_eq!(ledger.entries()[2].contest_id, 2);
    }
}
