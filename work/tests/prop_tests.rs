use proptest::prelude::*;

use votechain_types::Difficulty;
use votechain_work::{proof_digest, validate_proof, ProofGenerator};

proptest! {
    /// Validation agrees with a literal check of the hex digest prefix.
    #[test]
    fn validation_matches_hex_prefix(
        last_proof in any::<u64>(),
        proof in any::<u64>(),
        zeros in 0u32..=3,
    ) {
        let hex = hex::encode(proof_digest(last_proof, proof));
        let expected = hex.starts_with(&"0".repeat(zeros as usize));
        prop_assert_eq!(validate_proof(last_proof, proof, Difficulty::new(zeros)), expected);
    }

    /// A found proof is valid and nothing smaller is.
    #[test]
    fn found_proof_is_minimal(last_proof in 0u64..1_000_000) {
        let difficulty = Difficulty::new(1);
        let proof = ProofGenerator::new(difficulty).find_proof(last_proof).unwrap();
        prop_assert!(validate_proof(last_proof, proof, difficulty));
        prop_assert!((0..proof).all(|p| !validate_proof(last_proof, p, difficulty)));
    }

    /// Validation is deterministic: same inputs produce same result.
    #[test]
    fn validation_is_deterministic(
        last_proof in any::<u64>(),
        proof in any::<u64>(),
        zeros in 0u32..=64,
    ) {
        let difficulty = Difficulty::new(zeros);
        prop_assert_eq!(
            validate_proof(last_proof, proof, difficulty),
            validate_proof(last_proof, proof, difficulty)
        );
    }

    /// Lower difficulty is easier to meet: if valid at D, then valid at D-1.
    #[test]
    fn lower_difficulty_is_easier(
        last_proof in any::<u64>(),
        proof in any::<u64>(),
        zeros in 1u32..=64,
    ) {
        if validate_proof(last_proof, proof, Difficulty::new(zeros)) {
            prop_assert!(validate_proof(last_proof, proof, Difficulty::new(zeros - 1)));
        }
    }
}
