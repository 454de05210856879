use std::collections::HashMap;
use std::sync::Mutex;

use super::error::StoreError;
use super::ContestStore;
use crate::model::Contest;

/// In-memory store for UI hosts and tests.
///
/// Aggregates round-trip through the wire codec so in-memory and on-disk
/// behavior stay byte-identical (including version and checksum handling).
#[derive(Debug, Default)]
pub struct MemoryContestStore {
    records: Mutex<HashMap<u64, Vec<u8>>>,
}

impl MemoryContestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, contest_id: u64) -> bool {
        self.records.lock().expect("memory store lock poisoned").contains_key(&contest_id)
    }

    /// Raw persisted bytes, for byte-for-byte idempotence checks.
    pub fn raw_bytes(&self, contest_id: u64) -> Option<Vec<u8>> {
        self.records.lock().expect("memory store lock poisoned").get(&contest_id).cloned()
    }
}

impl ContestStore for MemoryContestStore {
    fn load(&self, contest_id: u64) -> Result<Contest, StoreError> {
        let records = self.records.lock().expect("memory store lock poisoned");
        let bytes = records.get(&contest_id).ok_or(StoreError::NotFound { contest_id })?;
        let record = super::format::decompress_and_deserialize(bytes)?;
        Ok(record.contest)
    }

    fn save(&self, contest_id: u64, contest: &Contest) -> Result<(), StoreError> {
        let record = super::format::ContestRecord::new(contest_id, contest.clone());
        let bytes = super::format::serialize_and_compress(&record)?;
        self.records.lock().expect("memory store lock poisoned").insert(contest_id, bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContestRules, Participant};

    fn sample_contest() -> Contest {
        let participants =
            (0..8).map(|i| Participant::new(i, i % 4, format!("Shooter {i}"))).collect();
        Contest::new(2027, participants, ContestRules::default()).unwrap()
    }

    #[test]
    fn test_missing_contest_is_not_found() {
        let store = MemoryContestStore::new();
        assert!(matches!(store.load(42), Err(StoreError::NotFound { contest_id: 42 })));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = MemoryContestStore::new();
        let contest = sample_contest();

        store.save(42, &contest).unwrap();
        let loaded = store.load(42).unwrap();
        assert_eq!(contest, loaded);
    }

    #[test]
    fn test_save_overwrites_whole_aggregate() {
        let store = MemoryContestStore::new();
        let mut contest = sample_contest();
        store.save(42, &contest).unwrap();

        contest.winner = Some(3);
        store.save(42, &contest).unwrap();

        assert_eq!(store.load(42).unwrap().winner, Some(3));
    }
}
