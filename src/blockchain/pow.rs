use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::TARGET_SUFFIX;
use crate::error::{LedgerError, Result};

/// How many candidates are tried between cancellation/deadline checks.
const CHECK_INTERVAL: u64 = 4096;

/// Bounds applied to a single proof search.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Largest candidate tried before giving up with `ProofSearchExhausted`.
    pub max_proof: u64,
    /// Wall-clock budget for the search (None = forever).
    pub max_duration: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_proof: u64::MAX,
            max_duration: None,
        }
    }
}

/// Cancels every search holding a token issued before the last `cancel_all`.
#[derive(Debug, Clone, Default)]
pub struct CancelSwitch {
    epoch: Arc<AtomicU64>,
}

impl CancelSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            epoch: Arc::clone(&self.epoch),
            issued: self.epoch.load(Ordering::SeqCst),
        }
    }

    pub fn cancel_all(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}

/// Handle polled by a running search.
#[derive(Debug, Clone)]
pub struct CancelToken {
    epoch: Arc<AtomicU64>,
    issued: u64,
}

impl CancelToken {
    /// A token nobody can cancel.
    pub fn never() -> Self {
        CancelSwitch::new().token()
    }

    pub fn is_cancelled(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) != self.issued
    }
}

/// Does SHA-256("{last_proof}{proof}") end with the target suffix?
pub fn is_valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let digest = hex::encode(Sha256::digest(guess.as_bytes()));
    digest.ends_with(TARGET_SUFFIX)
}

/// Find the smallest proof valid against `last_proof`, with no deadline.
pub fn proof_of_work(last_proof: u64) -> Result<u64> {
    search(last_proof, &SearchLimits::default(), &CancelToken::never())
}

/// Linear search over `0..=limits.max_proof` for the first valid proof.
///
/// The candidate counter never wraps: reaching `max_proof` without a hit
/// yields `ProofSearchExhausted`.
pub fn search(last_proof: u64, limits: &SearchLimits, cancel: &CancelToken) -> Result<u64> {
    let started = Instant::now();
    let mut proof: u64 = 0;

    loop {
        if is_valid_proof(last_proof, proof) {
            return Ok(proof);
        }
        if proof >= limits.max_proof {
            return Err(LedgerError::ProofSearchExhausted {
                limit: limits.max_proof,
            });
        }
        proof += 1;

        if proof % CHECK_INTERVAL == 0 {
            if cancel.is_cancelled() {
                return Err(LedgerError::SearchCancelled);
            }
            if let Some(max) = limits.max_duration {
                if started.elapsed() >= max {
                    return Err(LedgerError::SearchTimedOut { tried: proof });
                }
            }
        }
    }
}
