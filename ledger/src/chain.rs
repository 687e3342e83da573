//! Full-chain audit.

use votechain_types::ChainParams;
use votechain_work::validate_proof;

use crate::block::Block;
use crate::error::{IntegrityViolation, LedgerError};

/// Walk `chain` from genesis and check every link.
///
/// Genesis must sit at index 1 with the configured proof and sentinel
/// previous hash. Each later block must follow its predecessor by exactly one
/// index, carry the predecessor's hash, hold a proof that is valid against
/// the predecessor's proof, and belong to the same election.
pub fn verify_chain(
    chain: &[Block],
    election_name: &str,
    params: &ChainParams,
) -> Result<(), LedgerError> {
    let genesis = chain.first().ok_or(IntegrityViolation::MissingGenesis)?;
    if genesis.index != 1 {
        return Err(IntegrityViolation::IndexGap {
            expected: 1,
            actual: genesis.index,
        }
        .into());
    }
    if genesis.previous_hash != params.genesis_previous_hash {
        return Err(IntegrityViolation::InvalidGenesis("unexpected previous hash".into()).into());
    }
    if genesis.proof != params.genesis_proof {
        return Err(IntegrityViolation::InvalidGenesis(format!(
            "proof {} is not the genesis proof {}",
            genesis.proof, params.genesis_proof
        ))
        .into());
    }
    check_election(genesis, election_name)?;

    for pair in chain.windows(2) {
        let (prev, block) = (&pair[0], &pair[1]);

        let expected_index = prev.index + 1;
        if block.index != expected_index {
            return Err(IntegrityViolation::IndexGap {
                expected: expected_index,
                actual: block.index,
            }
            .into());
        }
        check_election(block, election_name)?;

        let expected_hash = prev.compute_hash();
        if block.previous_hash != expected_hash {
            return Err(IntegrityViolation::PreviousHashMismatch {
                index: block.index,
                expected: expected_hash,
                actual: block.previous_hash,
            }
            .into());
        }
        if !validate_proof(prev.proof, block.proof, params.difficulty) {
            return Err(IntegrityViolation::InvalidProof {
                index: block.index,
                last_proof: prev.proof,
                proof: block.proof,
            }
            .into());
        }
    }

    Ok(())
}

fn check_election(block: &Block, election_name: &str) -> Result<(), IntegrityViolation> {
    if block.election_name != election_name {
        return Err(IntegrityViolation::ElectionMismatch {
            index: block.index,
            expected: election_name.to_owned(),
            actual: block.election_name.clone(),
        });
    }
    Ok(())
}
