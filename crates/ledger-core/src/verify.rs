//! Chain integrity checks.
//!
//! Each block after genesis must record the fingerprint of its predecessor.
//! Genesis has no predecessor and is exempt, so a genesis-only chain is valid.
//! The checks only read; they report a broken link and leave acting on it to
//! the caller.

use crate::constants::PARALLEL_VERIFY_THRESHOLD;
use crate::hash::BlockHasher;
use crate::Block;
use rayon::prelude::*;
use tracing::warn;

/// Index of the first block whose `previous_hash` does not match the
/// fingerprint of the block before it.
pub fn first_invalid_link<H: BlockHasher + ?Sized>(blocks: &[Block], hasher: &H) -> Option<u64> {
    blocks
        .windows(2)
        .position(|pair| pair[1].previous_hash != hasher.hash(&pair[0]))
        .map(|pos| {
            let index = pos as u64 + 1;
            warn!("chain link broken at block {}", index);
            index
        })
}

pub fn verify<H: BlockHasher + ?Sized>(blocks: &[Block], hasher: &H) -> bool {
    first_invalid_link(blocks, hasher).is_none()
}

/// Same answer as [`verify`], checking adjacent pairs across the rayon pool.
/// Short chains fall back to the sequential scan.
pub fn verify_parallel<H: BlockHasher + ?Sized>(blocks: &[Block], hasher: &H) -> bool {
    if blocks.len() < PARALLEL_VERIFY_THRESHOLD {
        return verify(blocks, hasher);
    }
    blocks
        .par_windows(2)
        .all(|pair| pair[1].previous_hash == hasher.hash(&pair[0]))
}
