//! The election: owner of the chain, the pending buffer, and the voter
//! registry.

use std::collections::HashSet;

use votechain_crypto::hash_voter_id;
use votechain_types::{ChainParams, Digest, Timestamp};
use votechain_work::{validate_proof, ProofGenerator};

use crate::block::Block;
use crate::chain::verify_chain;
use crate::error::{IntegrityViolation, LedgerError};
use crate::genesis::create_genesis_block;
use crate::registry::{PendingVotes, VoterRegistry};
use crate::tally::{tally, Results};
use crate::vote::Vote;

/// Default voting window.
pub const DEFAULT_VOTING_DAYS: u64 = 7;

/// A single election and its ledger.
///
/// The chain always holds at least the genesis block. Blocks are only ever
/// appended; nothing hands out mutable access to a committed block.
#[derive(Clone, Debug)]
pub struct Election {
    name: String,
    candidates: Vec<String>,
    starts_at: Timestamp,
    ends_at: Timestamp,
    params: ChainParams,
    chain: Vec<Block>,
    pending: PendingVotes,
    registry: VoterRegistry,
}

impl Election {
    /// Open an election now, running for `voting_duration_days`, with
    /// default chain parameters.
    pub fn new<I, S>(
        name: impl Into<String>,
        candidates: I,
        voting_duration_days: u64,
    ) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let starts_at = Timestamp::now();
        Self::with_params(
            name,
            candidates,
            starts_at,
            starts_at.saturating_add_days(voting_duration_days),
            ChainParams::default(),
        )
    }

    /// Open an election with an explicit window and chain parameters.
    ///
    /// The genesis block is created here, timestamped at `starts_at`.
    pub fn with_params<I, S>(
        name: impl Into<String>,
        candidates: I,
        starts_at: Timestamp,
        ends_at: Timestamp,
        params: ChainParams,
    ) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();

        if name.is_empty() {
            return Err(LedgerError::InvalidElection("election name is empty".into()));
        }
        if candidates.is_empty() {
            return Err(LedgerError::InvalidElection("no candidates".into()));
        }
        let mut seen = HashSet::with_capacity(candidates.len());
        if let Some(dup) = candidates.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(LedgerError::InvalidElection(format!(
                "candidate {dup:?} listed more than once"
            )));
        }
        if ends_at < starts_at {
            return Err(LedgerError::InvalidElection(format!(
                "election ends at {ends_at}, before it starts at {starts_at}"
            )));
        }

        let genesis = create_genesis_block(&name, &params, starts_at);
        tracing::info!(
            election = %name,
            candidates = candidates.len(),
            %starts_at,
            %ends_at,
            difficulty = %params.difficulty,
            "election initialized"
        );

        Ok(Self {
            name,
            candidates,
            starts_at,
            ends_at,
            params,
            chain: vec![genesis],
            pending: PendingVotes::new(),
            registry: VoterRegistry::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    pub fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds the genesis block")
    }

    /// Votes admitted since the last block.
    pub fn pending_votes(&self) -> &[Vote] {
        self.pending.as_slice()
    }

    /// Number of voters who have cast a ballot, committed or pending.
    pub fn voter_count(&self) -> usize {
        self.registry.len()
    }

    pub fn has_voted(&self, raw_voter_id: &str) -> bool {
        self.registry.contains(raw_voter_id)
    }

    /// Hash of the block at 1-based `index`.
    pub fn hash_block_at(&self, index: u64) -> Option<Digest> {
        let pos = usize::try_from(index.checked_sub(1)?).ok()?;
        self.chain.get(pos).map(Block::compute_hash)
    }

    // ── Vote admission ─────────────────────────────────────────────────

    /// Admit one ballot into the pending buffer.
    pub fn cast_vote(&mut self, raw_voter_id: &str, candidate: &str) -> Result<Vote, LedgerError> {
        self.cast_vote_at(raw_voter_id, candidate, Timestamp::now())
    }

    /// [`cast_vote`](Self::cast_vote) with an explicit cast time.
    ///
    /// Nothing changes on failure. On success the vote is appended to the
    /// pending buffer and the raw id is recorded in the registry.
    pub fn cast_vote_at(
        &mut self,
        raw_voter_id: &str,
        candidate: &str,
        now: Timestamp,
    ) -> Result<Vote, LedgerError> {
        if !self.candidates.iter().any(|c| c == candidate) {
            tracing::debug!(election = %self.name, candidate, "vote rejected: invalid candidate");
            return Err(LedgerError::InvalidCandidate {
                candidate: candidate.to_owned(),
                valid: self.candidates.clone(),
            });
        }
        if self.registry.contains(raw_voter_id) {
            tracing::debug!(election = %self.name, "vote rejected: duplicate voter");
            return Err(LedgerError::DuplicateVoter);
        }

        let vote = Vote::new(hash_voter_id(raw_voter_id), candidate, now);
        self.pending.push(vote.clone());
        self.registry.insert(raw_voter_id);

        tracing::debug!(
            election = %self.name,
            voter = %vote.voter_id(),
            candidate,
            pending = self.pending.len(),
            "vote admitted"
        );
        Ok(vote)
    }

    // ── Proof-of-work ──────────────────────────────────────────────────

    /// The `(last_proof, previous_hash)` pair the next block must build on.
    pub fn next_proof_input(&self) -> (u64, Digest) {
        let last = self.last_block();
        (last.proof, last.compute_hash())
    }

    /// Search for the next proof at this election's difficulty.
    ///
    /// Blocks until found. Long-running callers should drive a
    /// [`ProofGenerator`] themselves with a cancel token and timeout.
    pub fn compute_next_proof(&self, last_proof: u64) -> Result<u64, LedgerError> {
        Ok(ProofGenerator::new(self.params.difficulty).find_proof(last_proof)?)
    }

    // ── Block creation ─────────────────────────────────────────────────

    /// Commit every pending vote into a new block.
    pub fn create_block(&mut self, proof: u64, previous_hash: Digest) -> Result<Block, LedgerError> {
        self.create_block_at(proof, previous_hash, Timestamp::now())
    }

    /// [`create_block`](Self::create_block) with an explicit creation time.
    ///
    /// `proof` must be valid against the last block's proof and
    /// `previous_hash` must equal the last block's hash; otherwise the chain
    /// and the pending buffer are left untouched.
    pub fn create_block_at(
        &mut self,
        proof: u64,
        previous_hash: Digest,
        now: Timestamp,
    ) -> Result<Block, LedgerError> {
        let last = self.last_block();
        let index = last.index + 1;

        if !validate_proof(last.proof, proof, self.params.difficulty) {
            tracing::warn!(election = %self.name, index, proof, "block rejected: invalid proof");
            return Err(IntegrityViolation::InvalidProof {
                index,
                last_proof: last.proof,
                proof,
            }
            .into());
        }
        let expected = last.compute_hash();
        if previous_hash != expected {
            tracing::warn!(election = %self.name, index, "block rejected: previous hash mismatch");
            return Err(IntegrityViolation::PreviousHashMismatch {
                index,
                expected,
                actual: previous_hash,
            }
            .into());
        }

        let block = Block {
            index,
            timestamp: now,
            votes: self.pending.take(),
            proof,
            previous_hash,
            election_name: self.name.clone(),
        };
        tracing::info!(
            election = %self.name,
            index,
            votes = block.votes.len(),
            proof,
            "block created"
        );
        self.chain.push(block.clone());
        Ok(block)
    }

    // ── Tally ──────────────────────────────────────────────────────────

    /// Tally every committed vote.
    ///
    /// Fails with [`LedgerError::ElectionStillOpen`] before the election end
    /// unless `force_close` is set.
    pub fn get_results(&self, force_close: bool) -> Result<Results, LedgerError> {
        self.get_results_at(force_close, Timestamp::now())
    }

    /// [`get_results`](Self::get_results) against an explicit clock.
    pub fn get_results_at(&self, force_close: bool, now: Timestamp) -> Result<Results, LedgerError> {
        if !force_close && !self.ends_at.has_passed(now) {
            return Err(LedgerError::ElectionStillOpen {
                ends_at: self.ends_at,
            });
        }
        tally(&self.name, &self.candidates, &self.chain)
    }

    /// Audit every link in the chain.
    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        verify_chain(&self.chain, &self.name, &self.params)
    }
}
