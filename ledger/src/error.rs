use thiserror::Error;

use votechain_types::{Digest, Timestamp};
use votechain_work::WorkError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid election: {0}")]
    InvalidElection(String),

    #[error("invalid candidate {candidate:?}, choose from: {}", .valid.join(", "))]
    InvalidCandidate { candidate: String, valid: Vec<String> },

    #[error("this voter has already cast a vote")]
    DuplicateVoter,

    #[error("election is still open until {ends_at}")]
    ElectionStillOpen { ends_at: Timestamp },

    #[error("block {block_index} holds a vote for unknown candidate {candidate:?}")]
    UnknownCandidateInChain { candidate: String, block_index: u64 },

    #[error("chain integrity violated: {0}")]
    ChainIntegrity(#[from] IntegrityViolation),

    #[error("proof of work failed: {0}")]
    Work(#[from] WorkError),
}

/// A broken link between blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityViolation {
    #[error("chain has no genesis block")]
    MissingGenesis,

    #[error("invalid genesis block: {0}")]
    InvalidGenesis(String),

    #[error("expected block index {expected}, found {actual}")]
    IndexGap { expected: u64, actual: u64 },

    #[error("block {index} belongs to election {actual:?}, expected {expected:?}")]
    ElectionMismatch {
        index: u64,
        expected: String,
        actual: String,
    },

    #[error("block {index} previous hash {actual} does not match {expected}")]
    PreviousHashMismatch {
        index: u64,
        expected: Digest,
        actual: Digest,
    },

    #[error("block {index} proof {proof} is not valid after proof {last_proof}")]
    InvalidProof {
        index: u64,
        last_proof: u64,
        proof: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_candidate_lists_choices() {
        let err = LedgerError::InvalidCandidate {
            candidate: "Dave".into(),
            valid: vec!["Alice".into(), "Bob".into(), "Charlie".into()],
        };
        assert_eq!(
            err.to_string(),
            "invalid candidate \"Dave\", choose from: Alice, Bob, Charlie"
        );
    }

    #[test]
    fn integrity_violation_converts() {
        let err: LedgerError = IntegrityViolation::MissingGenesis.into();
        assert!(matches!(
            err,
            LedgerError::ChainIntegrity(IntegrityViolation::MissingGenesis)
        ));
    }
}
