//! Proof-of-work nonce search
//!
//! Brute-force ascending search for the smallest nonce whose guess hash
//! carries the required number of leading '0' hex characters. Expected
//! cost grows as 16^difficulty, so the search also comes in a
//! cancellable flavour for callers that run it off-thread.

use crate::core::transaction::Transaction;
use crate::crypto::{meets_difficulty, pow_guess_hash};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Default number of leading '0' hex characters a block hash must carry.
pub const MINING_DIFFICULTY: usize = 2;

/// How many nonces to try between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Mining statistics
#[derive(Debug, Clone)]
pub struct MiningStats {
    /// Number of hash attempts
    pub attempts: u64,
    /// Time taken in milliseconds
    pub time_ms: u128,
    /// Hash rate (hashes per second)
    pub hash_rate: f64,
}

/// Miner for searching block nonces
#[derive(Debug, Clone)]
pub struct Miner {
    difficulty: usize,
}

impl Miner {
    pub fn new(difficulty: usize) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Find the smallest valid nonce for a pool snapshot.
    ///
    /// Deterministic: identical inputs always yield the identical nonce.
    /// Runs until a nonce is found; with pathological difficulty that is
    /// unbounded, so prefer [`Miner::mine_cancellable`] off-thread.
    pub fn mine(&self, transactions: &[Transaction], last_hash: &str) -> (u64, MiningStats) {
        let never = AtomicBool::new(false);
        match self.mine_cancellable(transactions, last_hash, &never) {
            Some(result) => result,
            // Only reachable if the nonce space is exhausted.
            None => (
                0,
                MiningStats {
                    attempts: 0,
                    time_ms: 0,
                    hash_rate: 0.0,
                },
            ),
        }
    }

    /// Cancellable nonce search; returns None once `cancel` is raised.
    ///
    /// The flag is polled between batches of attempts, so cancellation
    /// latency is bounded by one batch of hashing.
    pub fn mine_cancellable(
        &self,
        transactions: &[Transaction],
        last_hash: &str,
        cancel: &AtomicBool,
    ) -> Option<(u64, MiningStats)> {
        let start = Instant::now();
        let mut nonce = 0u64;

        info!(
            "Mining over {} transaction(s) with difficulty {}...",
            transactions.len(),
            self.difficulty
        );

        loop {
            if nonce % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                info!("Mining cancelled after {} attempt(s)", nonce);
                return None;
            }

            let guess = pow_guess_hash(transactions, last_hash, nonce);
            if meets_difficulty(&guess, self.difficulty) {
                let stats = Self::stats(nonce + 1, start);
                info!(
                    "Nonce {} found in {}ms ({} attempts, {:.2} H/s)",
                    nonce, stats.time_ms, stats.attempts, stats.hash_rate
                );
                return Some((nonce, stats));
            }

            nonce = nonce.checked_add(1)?;
        }
    }

    fn stats(attempts: u64, start: Instant) -> MiningStats {
        let time_ms = start.elapsed().as_millis();
        let hash_rate = if time_ms > 0 {
            (attempts as f64) / (time_ms as f64 / 1000.0)
        } else {
            attempts as f64
        };
        MiningStats {
            attempts,
            time_ms,
            hash_rate,
        }
    }
}

impl Default for Miner {
    fn default() -> Self {
        Self::new(MINING_DIFFICULTY)
    }
}
