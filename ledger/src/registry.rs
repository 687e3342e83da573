//! Voter registry and pending-vote buffer.

use std::collections::HashSet;

use crate::vote::Vote;

/// Raw ids of every voter whose ballot has been admitted.
///
/// Grows by one per accepted vote and never shrinks.
#[derive(Clone, Debug, Default)]
pub struct VoterRegistry {
    voters: HashSet<String>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, raw_voter_id: &str) -> bool {
        self.voters.contains(raw_voter_id)
    }

    /// Record a voter. Returns `false` if they were already present.
    pub fn insert(&mut self, raw_voter_id: &str) -> bool {
        if self.voters.contains(raw_voter_id) {
            return false;
        }
        self.voters.insert(raw_voter_id.to_owned())
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }
}

/// Votes admitted since the last block, in admission order.
#[derive(Clone, Debug, Default)]
pub struct PendingVotes {
    votes: Vec<Vote>,
}

impl PendingVotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    /// Move every pending vote out, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<Vote> {
        std::mem::take(&mut self.votes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vote> {
        self.votes.iter()
    }

    pub fn as_slice(&self) -> &[Vote] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
