//! Blocks: committed, hash-linked batches of votes.

use serde::{Deserialize, Serialize};

use votechain_crypto::hash_block;
use votechain_types::{Digest, Timestamp};

use crate::vote::Vote;

/// One committed batch of votes.
///
/// Field order is the canonical serialization order; changing it changes
/// every block hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain; genesis is 1.
    pub index: u64,
    /// When the block was created.
    pub timestamp: Timestamp,
    /// Votes committed in this block, in admission order.
    pub votes: Vec<Vote>,
    /// Proof that satisfied the work function against the previous proof.
    pub proof: u64,
    /// Hash of the previous block (sentinel for genesis).
    pub previous_hash: Digest,
    /// Owning election.
    pub election_name: String,
}

impl Block {
    /// Canonical serialized form: compact JSON in field declaration order,
    /// timestamps as integer seconds, digests as lowercase hex.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("Block is always serializable to JSON")
    }

    /// Hash of the canonical form. The next block must carry this as its
    /// `previous_hash`.
    pub fn compute_hash(&self) -> Digest {
        hash_block(&self.canonical_bytes())
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 1
    }
}
