//! The election node — serializes ledger mutation and runs proof search off
//! the request path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use votechain_ledger::{Block, Election, Results, Vote};
use votechain_types::{Digest, Timestamp};
use votechain_work::{CancelToken, ProofGenerator};

use crate::config::NodeConfig;
use crate::error::NodeError;

/// A running election authority.
///
/// Cheap to clone; clones share the same election and shutdown signal.
#[derive(Clone)]
pub struct ElectionNode {
    election: Arc<RwLock<Election>>,
    generator: ProofGenerator,
    proof_timeout: Option<Duration>,
    shutdown: CancelToken,
}

impl ElectionNode {
    /// Initialize a new election from configuration. The voting window
    /// starts now.
    pub fn new(config: &NodeConfig) -> Result<Self, NodeError> {
        let starts_at = Timestamp::now();
        let election = Election::with_params(
            config.election_name.clone(),
            config.candidates.iter().cloned(),
            starts_at,
            starts_at.saturating_add_days(config.voting_duration_days),
            config.chain_params(),
        )?;

        let node = Self::with_election(election)
            .with_proof_timeout(config.proof_timeout())
            .with_batch_size(config.proof_batch_size);
        Ok(node)
    }

    /// Wrap an existing election. Proof search uses the election's
    /// difficulty and has no timeout.
    pub fn with_election(election: Election) -> Self {
        let generator = ProofGenerator::new(election.params().difficulty);
        Self {
            election: Arc::new(RwLock::new(election)),
            generator,
            proof_timeout: None,
            shutdown: CancelToken::new(),
        }
    }

    pub fn with_proof_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.proof_timeout = timeout;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.generator = self.generator.with_batch_size(batch_size);
        self
    }

    // ── Mutations (write lock) ─────────────────────────────────────────

    pub async fn cast_vote(&self, voter_id: &str, candidate: &str) -> Result<Vote, NodeError> {
        let mut election = self.election.write().await;
        Ok(election.cast_vote(voter_id, candidate)?)
    }

    pub async fn create_block(
        &self,
        proof: u64,
        previous_hash: Digest,
    ) -> Result<Block, NodeError> {
        let mut election = self.election.write().await;
        Ok(election.create_block(proof, previous_hash)?)
    }

    // ── Proof-of-work (no lock held) ───────────────────────────────────

    /// Search for the proof following `last_proof` on the blocking pool.
    pub async fn compute_next_proof(&self, last_proof: u64) -> Result<u64, NodeError> {
        let generator = self.generator.clone();
        let cancel = self.shutdown.clone();
        let timeout = self.proof_timeout;

        let proof = tokio::task::spawn_blocking(move || {
            generator.find_proof_with(last_proof, &cancel, timeout)
        })
        .await
        .map_err(|e| NodeError::Join(e.to_string()))??;
        Ok(proof)
    }

    /// Find a proof for the current chain head and commit the pending votes.
    ///
    /// The ledger is unlocked during the search. If another block is
    /// committed in the meantime the stale proof is rejected with a chain
    /// integrity error and the pending votes stay queued.
    pub async fn mine_block(&self) -> Result<Block, NodeError> {
        let (last_proof, previous_hash) = self.election.read().await.next_proof_input();
        let proof = self.compute_next_proof(last_proof).await?;
        let block = self.create_block(proof, previous_hash).await?;
        tracing::info!(index = block.index, votes = block.votes.len(), "block mined");
        Ok(block)
    }

    /// Cancel any running or future proof search.
    pub fn shutdown(&self) {
        tracing::info!("election node shutting down");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    // ── Reads (read lock) ──────────────────────────────────────────────

    pub async fn results(&self, force_close: bool) -> Result<Results, NodeError> {
        Ok(self.election.read().await.get_results(force_close)?)
    }

    pub async fn verify_chain(&self) -> Result<(), NodeError> {
        Ok(self.election.read().await.verify_chain()?)
    }

    pub async fn chain(&self) -> Vec<Block> {
        self.election.read().await.chain().to_vec()
    }

    pub async fn last_block(&self) -> Block {
        self.election.read().await.last_block().clone()
    }

    pub async fn chain_len(&self) -> usize {
        self.election.read().await.chain().len()
    }

    pub async fn pending_count(&self) -> usize {
        self.election.read().await.pending_votes().len()
    }

    pub async fn hash_block_at(&self, index: u64) -> Option<Digest> {
        self.election.read().await.hash_block_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_types::{ChainParams, Difficulty};

    fn node(difficulty: u32) -> ElectionNode {
        let start = Timestamp::new(1_700_000_000);
        let election = Election::with_params(
            "Poll",
            ["Yes", "No"],
            start,
            start.saturating_add_days(1),
            ChainParams::with_difficulty(Difficulty::new(difficulty)),
        )
        .unwrap();
        ElectionNode::with_election(election)
    }

    #[tokio::test]
    async fn mine_commits_pending_votes() {
        let node = node(1);
        node.cast_vote("a", "Yes").await.unwrap();
        node.cast_vote("b", "No").await.unwrap();
        assert_eq!(node.pending_count().await, 2);

        let block = node.mine_block().await.unwrap();
        assert_eq!(block.index, 2);
        assert_eq!(block.votes.len(), 2);
        assert_eq!(node.pending_count().await, 0);
        assert_eq!(node.chain_len().await, 2);
        assert_eq!(node.last_block().await, block);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let node = node(1);
        let other = node.clone();
        other.cast_vote("a", "Yes").await.unwrap();
        assert_eq!(node.pending_count().await, 1);
        other.shutdown();
        assert!(node.is_shut_down());
    }
}
