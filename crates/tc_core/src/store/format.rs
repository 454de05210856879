use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

use super::error::StoreError;
use super::STORE_VERSION;
use crate::model::Contest;

/// Versioned on-disk envelope around the contest aggregate.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ContestRecord {
    /// Store format version for migration.
    pub version: u32,

    /// Write timestamp (unix milliseconds).
    pub timestamp: u64,

    /// Host-assigned contest identifier.
    pub contest_id: u64,

    /// The whole aggregate; never partially written.
    pub contest: Contest,
}

impl ContestRecord {
    pub fn new(contest_id: u64, contest: Contest) -> Self {
        Self {
            version: STORE_VERSION,
            timestamp: crate::awards::current_timestamp_ms(),
            contest_id,
            contest,
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = crate::awards::current_timestamp_ms();
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.contest.participants.is_empty() || self.contest.rounds.is_empty() {
            return Err(StoreError::Corrupted);
        }
        Ok(())
    }
}

/// Serialize and compress a contest record
pub fn serialize_and_compress(record: &ContestRecord) -> Result<Vec<u8>, StoreError> {
    // Validate before serialization
    record.validate()?;

    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(record).map_err(StoreError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a contest record
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<ContestRecord, StoreError> {
    // Check minimum size (header + checksum)
    if bytes.len() < 4 + 32 {
        return Err(StoreError::Corrupted);
    }

    // Split payload and checksum
    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    // Verify checksum
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(StoreError::ChecksumMismatch);
    }

    // Decompress
    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;

    // Deserialize
    let record: ContestRecord = from_slice(&msgpack).map_err(StoreError::Deserialization)?;

    // Validate version
    if record.version > STORE_VERSION {
        return Err(StoreError::VersionMismatch { found: record.version, expected: STORE_VERSION });
    }

    Ok(record)
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
    fn test_serialize_deserialize_roundtrip() {
        let record = ContestRecord::new(7, sample_contest());

        let serialized = serialize_and_compress(&record).unwrap();
        let deserialized = decompress_and_deserialize(&serialized).unwrap();

        assert_eq!(record.version, deserialized.version);
        assert_eq!(record.contest_id, deserialized.contest_id);
        assert_eq!(record.contest, deserialized.contest);
    }

    #[test]
    fn test_checksum_validation() {
        let record = ContestRecord::new(7, sample_contest());
        let mut serialized = serialize_and_compress(&record).unwrap();

        // Corrupt the checksum
        if let Some(last) = serialized.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let record = ContestRecord::new(7, sample_contest());
        let serialized = serialize_and_compress(&record).unwrap();

        let result = decompress_and_deserialize(&serialized[..10]);
        assert!(matches!(result, Err(StoreError::Corrupted)));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut record = ContestRecord::new(7, sample_contest());
        record.version = STORE_VERSION + 1;
        let serialized = serialize_and_compress(&record).unwrap();

        let result = decompress_and_deserialize(&serialized);
        assert!(matches!(result, Err(StoreError::VersionMismatch { .. })));
    }
}
