//! Hashing primitives for votechain.
//!
//! - **SHA-256** for block hashes, voter-id anonymization, and proof-of-work
//!   digests

pub mod hash;

pub use hash::{hash_block, hash_voter_id, sha256, sha256_multi};
