//! Proof search (multi-threaded CPU).

use std::time::{Duration, Instant};

use rayon::prelude::*;
use votechain_types::Difficulty;

use crate::{validate_proof, CancelToken, WorkError};

/// Candidates scanned per batch before checking the cancellation flag and
/// the deadline.
pub const DEFAULT_BATCH_SIZE: u64 = 4096;

/// Searches for the smallest valid proof following a given last proof.
#[derive(Clone, Debug)]
pub struct ProofGenerator {
    difficulty: Difficulty,
    batch_size: u64,
}

impl ProofGenerator {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Find the smallest non-negative proof for `last_proof`.
    ///
    /// Blocks the calling thread until a proof is found; prefer
    /// [`find_proof_with`](Self::find_proof_with) off latency-sensitive paths.
    pub fn find_proof(&self, last_proof: u64) -> Result<u64, WorkError> {
        self.find_proof_with(last_proof, &CancelToken::new(), None)
    }

    /// Find the smallest non-negative proof for `last_proof`, giving up when
    /// `cancel` fires or `timeout` elapses.
    ///
    /// Candidates are scanned in consecutive batches. Within a batch the work
    /// is spread across the rayon pool, and `find_first` keeps the lowest
    /// match, so the result is identical to a sequential scan from zero.
    pub fn find_proof_with(
        &self,
        last_proof: u64,
        cancel: &CancelToken,
        timeout: Option<Duration>,
    ) -> Result<u64, WorkError> {
        let difficulty = self.difficulty;
        let started = Instant::now();
        let mut start = 0u64;

        tracing::debug!(last_proof, %difficulty, "proof search started");

        loop {
            if cancel.is_cancelled() {
                tracing::warn!(last_proof, searched = start, "proof search cancelled");
                return Err(WorkError::Cancelled);
            }
            if let Some(limit) = timeout {
                let elapsed = started.elapsed();
                if elapsed >= limit {
                    tracing::warn!(last_proof, searched = start, ?elapsed, "proof search timed out");
                    return Err(WorkError::TimedOut { elapsed });
                }
            }

            let end = start.saturating_add(self.batch_size);
            let found = (start..end)
                .into_par_iter()
                .find_first(|&proof| validate_proof(last_proof, proof, difficulty));

            if let Some(proof) = found {
                tracing::debug!(last_proof, proof, elapsed = ?started.elapsed(), "proof found");
                return Ok(proof);
            }

            if end == u64::MAX {
                // Ranges are half-open; the final value is checked on its own.
                return if validate_proof(last_proof, u64::MAX, difficulty) {
                    Ok(u64::MAX)
                } else {
                    Err(WorkError::Exhausted)
                };
            }
            start = end;
        }
    }
}

impl Default for ProofGenerator {
    fn default() -> Self {
        Self::new(Difficulty::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_proof_at_default_difficulty() {
        let generator = ProofGenerator::default();
        assert_eq!(generator.find_proof(100).unwrap(), 35293);
        assert_eq!(generator.find_proof(35293).unwrap(), 35089);
    }

    #[test]
    fn finds_smallest_proof() {
        let difficulty = Difficulty::new(2);
        let generator = ProofGenerator::new(difficulty);
        let proof = generator.find_proof(100).unwrap();
        assert_eq!(proof, 226);
        assert!((0..proof).all(|p| !validate_proof(100, p, difficulty)));
    }

    #[test]
    fn batch_size_does_not_change_result() {
        let difficulty = Difficulty::new(2);
        let small = ProofGenerator::new(difficulty).with_batch_size(7);
        let large = ProofGenerator::new(difficulty).with_batch_size(100_000);
        assert_eq!(small.find_proof(0).unwrap(), 563);
        assert_eq!(large.find_proof(0).unwrap(), 563);
    }

    #[test]
    fn zero_difficulty_returns_zero() {
        let generator = ProofGenerator::new(Difficulty::new(0));
        assert_eq!(generator.find_proof(12345).unwrap(), 0);
    }

    #[test]
    fn cancelled_token_stops_search() {
        let generator = ProofGenerator::new(Difficulty::MAX);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = generator.find_proof_with(1, &cancel, None);
        assert!(matches!(result, Err(WorkError::Cancelled)));
    }

    #[test]
    fn timeout_stops_search() {
        let generator = ProofGenerator::new(Difficulty::MAX);
        let result =
            generator.find_proof_with(1, &CancelToken::new(), Some(Duration::from_millis(20)));
        assert!(matches!(result, Err(WorkError::TimedOut { .. })));
    }

    #[test]
    fn cancel_from_another_thread() {
        let generator = ProofGenerator::new(Difficulty::MAX);
        let cancel = CancelToken::new();
        let remote = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let result = generator.find_proof_with(1, &cancel, None);
        handle.join().unwrap();
        assert!(matches!(result, Err(WorkError::Cancelled)));
    }
}
