use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::format::{decompress_and_deserialize, serialize_and_compress, ContestRecord};
use super::ContestStore;
use crate::model::Contest;

/// One-file-per-contest store with atomic writes.
#[derive(Debug, Clone)]
pub struct FileContestStore {
    dir: PathBuf,
}

impl FileContestStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn contest_path(&self, contest_id: u64) -> PathBuf {
        self.dir.join(format!("contest_{}.dat", contest_id))
    }

    pub fn exists(&self, contest_id: u64) -> bool {
        self.contest_path(contest_id).exists()
    }

    pub fn delete(&self, contest_id: u64) -> Result<(), StoreError> {
        let path = self.contest_path(contest_id);
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted contest {}", contest_id);
        }
        Ok(())
    }

    fn save_to_path(&self, path: &Path, record: &ContestRecord) -> Result<(), StoreError> {
        // Ensure store directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(record)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        // Atomic rename
        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(&self, path: &Path, contest_id: u64) -> Result<ContestRecord, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound { contest_id });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let record = decompress_and_deserialize(&data)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(record)
    }
}

impl ContestStore for FileContestStore {
    fn load(&self, contest_id: u64) -> Result<Contest, StoreError> {
        let path = self.contest_path(contest_id);
        let record = self.load_from_path(&path, contest_id)?;
        Ok(record.contest)
    }

    fn save(&self, contest_id: u64, contest: &Contest) -> Result<(), StoreError> {
        let path = self.contest_path(contest_id);
        let record = ContestRecord::new(contest_id, contest.clone());
        self.save_to_path(&path, &record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContestRules, Participant};
    use tempfile::TempDir;

    fn sample_contest() -> Contest {
        let participants =
            (0..8).map(|i| Participant::new(i, i % 4, format!("Shooter {i}"))).collect();
        Contest::new(2027, participants, ContestRules::default()).unwrap()
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileContestStore::new(temp_dir.path());
        let contest = sample_contest();

        store.save(5, &contest).unwrap();
        let loaded = store.load(5).unwrap();

        assert_eq!(contest, loaded);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileContestStore::new(temp_dir.path());

        store.save(5, &sample_contest()).unwrap();

        assert!(store.exists(5));
        let temp_path = store.contest_path(5).with_extension("tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_missing_contest_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileContestStore::new(temp_dir.path());

        assert!(matches!(store.load(99), Err(StoreError::NotFound { contest_id: 99 })));
    }

    #[test]
    fn test_corrupted_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileContestStore::new(temp_dir.path());
        store.save(5, &sample_contest()).unwrap();

        // Flip a byte in the compressed payload
        let path = store.contest_path(5);
        let mut data = std::fs::read(&path).unwrap();
        data[8] ^= 0xff;
        std::fs::write(&path, &data).unwrap();

        assert!(matches!(store.load(5), Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileContestStore::new(temp_dir.path());
        store.save(5, &sample_contest()).unwrap();

        store.delete(5).unwrap();
        assert!(!store.exists(5));
        store.delete(5).unwrap();
    }
}
