//! Chain parameters fixed at election initialization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Digest;

/// Proof-of-work difficulty, expressed as the number of leading hexadecimal
/// `0` characters the proof hash must start with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u32);

impl Difficulty {
    /// Four leading zeros: roughly 65k hash attempts per block on average.
    pub const DEFAULT: Self = Self(4);

    /// A SHA-256 hex digest has 64 characters.
    pub const MAX: Self = Self(64);

    pub fn new(leading_zeros: u32) -> Self {
        Self(leading_zeros.min(Self::MAX.0))
    }

    pub fn leading_zeros(&self) -> u32 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} leading zeros", self.0)
    }
}

/// Parameters that shape the chain for the lifetime of an election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Difficulty every non-genesis proof must meet.
    pub difficulty: Difficulty,
    /// Proof stored in the genesis block.
    pub genesis_proof: u64,
    /// Sentinel previous hash stored in the genesis block.
    pub genesis_previous_hash: Digest,
}

impl ChainParams {
    /// Well-known genesis proof.
    pub const GENESIS_PROOF: u64 = 100;

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::DEFAULT,
            genesis_proof: Self::GENESIS_PROOF,
            genesis_previous_hash: Digest::ZERO,
        }
    }
}
