//! Blockchain checkpoints
//!
//! What makes a good checkpoint block: it is surrounded by blocks with
//! reasonable timestamps (none before it with a later time, none after it
//! with an earlier one) and contains no strange transactions.

use crate::{Error, Result};
use bitcoin::BlockHash;
use std::collections::btree_map::{BTreeMap, Entry};

/// Blocks verified after the last checkpoint cost this much more than
/// blocks before it when signatures are checked.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

/// Checkpoint table with sync-progress metadata
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointData {
    checkpoints: BTreeMap<u32, BlockHash>,
    /// Timestamp of the last checkpoint block (Unix epoch)
    pub last_checkpoint_time: i64,
    /// Transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointData {
    /// Create a checkpoint table; a height may appear only once
    pub fn new<I>(
        checkpoints: I,
        last_checkpoint_time: i64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, BlockHash)>,
    {
        let mut map = BTreeMap::new();
        for (height, hash) in checkpoints {
            match map.entry(height) {
                Entry::Vacant(slot) => {
                    slot.insert(hash);
                }
                Entry::Occupied(_) => return Err(Error::DuplicateCheckpoint(height)),
            }
        }

        Ok(Self {
            checkpoints: map,
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        })
    }

    /// All checkpoints, ordered by height
    pub fn checkpoints(&self) -> &BTreeMap<u32, BlockHash> {
        &self.checkpoints
    }

    /// Hash expected at exactly `height`
    pub fn expected_hash_at(&self, height: u32) -> Option<&BlockHash> {
        self.checkpoints.get(&height)
    }

    /// Highest checkpoint at or below `height`; forks below it are rejected
    pub fn checkpoint_at_or_below(&self, height: u32) -> Option<(u32, &BlockHash)> {
        self.checkpoints
            .range(..=height)
            .next_back()
            .map(|(h, hash)| (*h, hash))
    }

    /// Whether `hash` agrees with the checkpoint at `height`, if there is one
    pub fn is_consistent(&self, height: u32, hash: &BlockHash) -> bool {
        self.checkpoints
            .get(&height)
            .map_or(true, |expected| expected == hash)
    }

    /// Latest checkpoint
    pub fn latest(&self) -> Option<(u32, &BlockHash)> {
        self.checkpoints.iter().next_back().map(|(h, hash)| (*h, hash))
    }

    /// Height of the last checkpoint
    pub fn total_blocks_estimate(&self) -> u32 {
        self.latest().map_or(0, |(height, _)| height)
    }

    /// Estimate verification progress in `[0, 1]` for a chain tip with
    /// `chain_tx` cumulative transactions and timestamp `tip_time`.
    ///
    /// Work before the last checkpoint is cheap; work after it costs
    /// [`SIGCHECK_VERIFICATION_FACTOR`] more when `sigchecks` is set.
    pub fn guess_verification_progress(
        &self,
        chain_tx: u64,
        tip_time: i64,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks { SIGCHECK_VERIFICATION_FACTOR } else { 1.0 };
        let per_day = self.transactions_per_day;

        let (work_before, work_after) = if chain_tx <= self.transactions_last_checkpoint {
            let cheap_before = chain_tx as f64;
            let cheap_after = (self.transactions_last_checkpoint - chain_tx) as f64;
            let expensive_after = (now - self.last_checkpoint_time) as f64 / 86_400.0 * per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = self.transactions_last_checkpoint as f64;
            let expensive_before = (chain_tx - self.transactions_last_checkpoint) as f64;
            let expensive_after = (now - tip_time) as f64 / 86_400.0 * per_day;
            (cheap_before + expensive_before * factor, expensive_after * factor)
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        (work_before / total).clamp(0.0, 1.0)
    }

    /// Number of checkpoints
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use proptest::prelude::*;

    fn hash(byte: u8) -> BlockHash {
        let mut bytes = [0u8; 32];
        bytes[0] = byte;
        BlockHash::from_byte_array(bytes)
    }

    fn sample() -> CheckpointData {
        CheckpointData::new(
            [(1_000, hash(0xaa)), (0, hash(0x00)), (5_000, hash(0xbb))],
            1_535_274_000,
            10_000,
            2_000.0,
        )
        .unwrap()
    }

    #[test]
    fn test_ordered_by_height() {
        let data = sample();
        let heights: Vec<u32> = data.checkpoints().keys().copied().collect();
        assert_eq!(heights, vec![0, 1_000, 5_000]);
        assert_eq!(data.len(), 3);
        assert_eq!(data.total_blocks_estimate(), 5_000);
    }

    #[test]
    fn test_checkpoint_at_or_below() {
        let data = sample();
        assert_eq!(data.checkpoint_at_or_below(0), Some((0, &hash(0x00))));
        assert_eq!(data.checkpoint_at_or_below(999), Some((0, &hash(0x00))));
        assert_eq!(data.checkpoint_at_or_below(1_000), Some((1_000, &hash(0xaa))));
        assert_eq!(data.checkpoint_at_or_below(u32::MAX), Some((5_000, &hash(0xbb))));
    }

    #[test]
    fn test_consistency() {
        let data = sample();
        assert!(data.is_consistent(1_000, &hash(0xaa)));
        assert!(!data.is_consistent(1_000, &hash(0xbb)));
        assert!(data.is_consistent(1_001, &hash(0xbb)));
        assert_eq!(data.expected_hash_at(5_000), Some(&hash(0xbb)));
        assert_eq!(data.expected_hash_at(4_999), None);
    }

    #[test]
    fn test_empty_table() {
        let data = CheckpointData::new([], 0, 0, 0.0).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.latest(), None);
        assert_eq!(data.total_blocks_estimate(), 0);
        assert_eq!(data.guess_verification_progress(0, 0, 0, true), 0.0);
    }

    #[test]
    fn test_duplicate_height_is_rejected() {
        let err = CheckpointData::new([(0, hash(0x00)), (10, hash(0xaa)), (10, hash(0xbb))], 0, 0, 0.0)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCheckpoint(10)));
        assert_eq!(err.kind(), crate::ErrorKind::InvariantViolation);
    }

    #[test]
    fn test_progress_before_checkpoint() {
        let data = sample();
        // Tip halfway to the checkpoint, clock at the checkpoint time.
        let progress = data.guess_verification_progress(5_000, 0, data.last_checkpoint_time, true);
        assert!((progress - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_progress_at_tip() {
        let data = sample();
        let now = data.last_checkpoint_time + 86_400;
        let progress = data.guess_verification_progress(12_000, now, now, true);
        assert_eq!(progress, 1.0);
    }

    #[test]
    fn test_progress_after_checkpoint() {
        let data = sample();
        let tip_time = data.last_checkpoint_time + 86_400;
        let now = tip_time + 86_400;
        // before = 10_000 + 2_000 * 5, after = 2_000 * 5
        let progress = data.guess_verification_progress(12_000, tip_time, now, true);
        assert!((progress - 20_000.0 / 30_000.0).abs() < 1e-9);
    }

    proptest! {
        /// Property: the anchor never lies above the queried height
        #[test]
        fn prop_anchor_not_above_height(height in any::<u32>()) {
            let data = sample();
            let (anchor, _) = data.checkpoint_at_or_below(height).unwrap();
            prop_assert!(anchor <= height);
            if anchor < height {
                prop_assert!(data.checkpoints().range(anchor + 1..=height).next().is_none());
            }
        }

        /// Property: progress stays within [0, 1]
        #[test]
        fn prop_progress_bounded(chain_tx in 0u64..100_000, elapsed in 0i64..10_000_000, sigchecks in any::<bool>()) {
            let data = sample();
            let now = data.last_checkpoint_time + elapsed;
            let progress = data.guess_verification_progress(chain_tx, data.last_checkpoint_time, now, sigchecks);
            prop_assert!((0.0..=1.0).contains(&progress));
        }
    }
}
