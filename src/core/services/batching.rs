//! Stable batching
//!
//! Splits a list into batches of roughly a target size such that adding or
//! removing one item only changes the batch that item lands in. Items are
//! sorted by key and a batch is cut after any key whose hash has enough
//! leading zero bits, so the cut points depend on the keys, not on positions.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors raised when the batch sizes are inconsistent
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BatchError {
    /// `size_target` must not exceed `size_max`
    #[error("size_target ({target}) must be less than or equal to size_max ({max})")]
    TargetExceedsMax {
        /// Requested target size
        target: usize,
        /// Requested maximum size
        max: usize,
    },
}

/// Partition `items` into stable batches of about `size_target` items
///
/// A batch is cut when it reaches `size_max`, or when it holds at least
/// `size_target / 4` items (at least one) and the current key's SHA-256 has at
/// least `log2(size_target)` leading zero bits.
pub fn partition_sequentially<T>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> String,
    size_target: usize,
    size_max: usize,
) -> Result<Vec<Vec<T>>, BatchError> {
    if size_target > size_max {
        return Err(BatchError::TargetExceedsMax {
            target: size_target,
            max: size_max,
        });
    }
    let size_target = size_target.max(1);
    let size_min = (size_target / 4).max(1);
    let zero_bits = size_target.ilog2();

    let mut keyed: Vec<(String, T)> = items.into_iter().map(|item| (key(&item), item)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut batches = Vec::new();
    let mut batch = Vec::new();
    for (item_key, item) in keyed {
        batch.push(item);
        if batch.len() >= size_max || (batch.len() >= size_min && leading_zero_bits(&item_key) >= zero_bits) {
            batches.push(std::mem::take(&mut batch));
        }
    }
    if !batch.is_empty() {
        batches.push(batch);
    }
    Ok(batches)
}

fn leading_zero_bits(key: &str) -> u32 {
    let digest = Sha256::digest(key.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix).leading_zeros()
}
