//! Proof-of-work mining
//!
//! A block is mined by walking its nonce upward until the hex digest of the
//! block starts with `difficulty` zero characters. Expected work grows as
//! `16^difficulty` hash evaluations; past difficulty 7 or so this gets
//! impractically slow, which is the intended cost and not a fault.
//!
//! The search blocks the calling thread. Use [`MiningLimit::Attempts`] to turn
//! "runs until found" into a [`ChainError::AttemptsExhausted`] failure.

use crate::blockchain::Block;
use crate::error::{ChainError, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const MIN_DIFFICULTY: u32 = 1;
/// A SHA-256 hex digest has 64 characters.
pub const MAX_DIFFICULTY: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum MiningLimit {
    #[default]
    Unbounded,
    /// Give up after this many hash evaluations.
    Attempts(u64),
}

impl MiningLimit {
    pub fn from_max_attempts(max_attempts: Option<u64>) -> Self {
        match max_attempts {
            Some(n) => MiningLimit::Attempts(n),
            None => MiningLimit::Unbounded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningOutcome {
    pub hash: String,
    pub attempts: u64,
    pub elapsed: Duration,
}

impl MiningOutcome {
    pub fn hash_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }
}

pub fn check_difficulty(difficulty: u32) -> Result<()> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        Ok(())
    } else {
        Err(ChainError::InvalidDifficulty(difficulty))
    }
}

pub fn target_prefix(difficulty: u32) -> String {
    "0".repeat(difficulty as usize)
}

pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    hash.len() >= difficulty as usize && hash.bytes().take(difficulty as usize).all(|b| b == b'0')
}

/// Search for a nonce in place, starting from the block's current nonce.
///
/// On success the block's hash satisfies the target and every other field is
/// untouched. On failure the nonce is left where the search stopped.
pub fn mine_in_place(block: &mut Block, difficulty: u32, limit: MiningLimit) -> Result<MiningOutcome> {
    check_difficulty(difficulty)?;

    let start = Instant::now();
    let start_nonce = block.nonce;
    let mut attempts: u64 = 0;

    loop {
        if let MiningLimit::Attempts(max) = limit {
            if attempts >= max {
                debug!(
                    "Mining stopped after {} attempts (nonce {}..{})",
                    attempts, start_nonce, block.nonce
                );
                return Err(ChainError::AttemptsExhausted { attempts });
            }
        }

        let hash = block.hash();
        attempts += 1;

        if meets_difficulty(&hash, difficulty) {
            let outcome = MiningOutcome {
                hash,
                attempts,
                elapsed: start.elapsed(),
            };
            info!(
                "Winning hash {} (nonce {}, {} attempts)",
                outcome.hash, block.nonce, outcome.attempts
            );
            return Ok(outcome);
        }

        block.nonce = block.nonce.checked_add(1).ok_or(ChainError::NonceExhausted)?;
    }
}

/// Owned variant of [`mine_in_place`]: returns the mined block.
pub fn mine_block(mut block: Block, difficulty: u32, limit: MiningLimit) -> Result<Block> {
    mine_in_place(&mut block, difficulty, limit)?;
    Ok(block)
}
