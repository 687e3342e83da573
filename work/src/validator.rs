//! Proof validation.

use votechain_crypto::sha256;
use votechain_types::Difficulty;

/// SHA-256 of the decimal text of `last_proof` immediately followed by the
/// decimal text of `proof`.
pub fn proof_digest(last_proof: u64, proof: u64) -> [u8; 32] {
    sha256(format!("{last_proof}{proof}").as_bytes())
}

/// Number of leading `0` characters in the hex form of `hash`.
pub fn leading_zero_nibbles(hash: &[u8; 32]) -> u32 {
    let mut count = 0;
    for byte in hash {
        if *byte == 0 {
            count += 2;
            continue;
        }
        if *byte >> 4 == 0 {
            count += 1;
        }
        break;
    }
    count
}

/// Whether `proof` is a valid successor of `last_proof` at `difficulty`.
pub fn validate_proof(last_proof: u64, proof: u64, difficulty: Difficulty) -> bool {
    leading_zero_nibbles(&proof_digest(last_proof, proof)) >= difficulty.leading_zeros()
}

/// [`validate_proof`] at [`Difficulty::DEFAULT`].
pub fn is_valid_proof(last_proof: u64, proof: u64) -> bool {
    validate_proof(last_proof, proof, Difficulty::DEFAULT)
}
