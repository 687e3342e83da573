//! Genesis block creation.
//!
//! Every election starts with a synthetic block at index 1. It carries no
//! votes, the well-known genesis proof, and the sentinel previous hash from
//! [`ChainParams`].

use votechain_types::{ChainParams, Timestamp};

use crate::block::Block;

/// Build the genesis block for an election.
pub fn create_genesis_block(
    election_name: &str,
    params: &ChainParams,
    timestamp: Timestamp,
) -> Block {
    Block {
        index: 1,
        timestamp,
        votes: Vec::new(),
        proof: params.genesis_proof,
        previous_hash: params.genesis_previous_hash,
        election_name: election_name.to_owned(),
    }
}
