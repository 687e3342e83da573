//! Result tallying.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::LedgerError;

/// Votes received by one candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCount {
    pub candidate: String,
    pub votes: u64,
}

/// Outcome of tallying every committed vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    pub election_name: String,
    pub total_votes: u64,
    /// One entry per candidate, in candidate-list order.
    pub counts: Vec<CandidateCount>,
    /// Highest count; ties go to the candidate listed first. `None` when no
    /// votes were committed.
    pub winner: Option<String>,
}

impl Results {
    pub fn count_for(&self, candidate: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|c| c.candidate == candidate)
            .map(|c| c.votes)
    }

    /// Whether more than one candidate shares the highest count.
    pub fn is_tie(&self) -> bool {
        let Some(max) = self.counts.iter().map(|c| c.votes).max() else {
            return false;
        };
        max > 0 && self.counts.iter().filter(|c| c.votes == max).count() > 1
    }
}

/// Count every vote in `chain` against `candidates`.
///
/// Only committed votes are counted; the pending buffer is not part of the
/// chain. A vote naming a candidate outside the list is reported rather than
/// skipped.
pub fn tally(
    election_name: &str,
    candidates: &[String],
    chain: &[Block],
) -> Result<Results, LedgerError> {
    let mut counts: Vec<CandidateCount> = candidates
        .iter()
        .map(|candidate| CandidateCount {
            candidate: candidate.clone(),
            votes: 0,
        })
        .collect();

    for block in chain {
        for vote in &block.votes {
            let entry = counts
                .iter_mut()
                .find(|c| c.candidate == vote.candidate())
                .ok_or_else(|| LedgerError::UnknownCandidateInChain {
                    candidate: vote.candidate().to_owned(),
                    block_index: block.index,
                })?;
            entry.votes += 1;
        }
    }

    let total_votes = counts.iter().map(|c| c.votes).sum();

    let mut leader: Option<&CandidateCount> = None;
    for count in &counts {
        if count.votes > 0 && leader.map_or(true, |l| count.votes > l.votes) {
            leader = Some(count);
        }
    }
    let winner = leader.map(|c| c.candidate.clone());

    Ok(Results {
        election_name: election_name.to_owned(),
        total_votes,
        counts,
        winner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::Vote;
    use votechain_types::{Digest, Timestamp};

    fn candidates() -> Vec<String> {
        vec!["Alice".into(), "Bob".into(), "Charlie".into()]
    }

    fn block(index: u64, picks: &[&str]) -> Block {
        Block {
            index,
            timestamp: Timestamp::new(index),
            votes: picks
                .iter()
                .enumerate()
                .map(|(i, c)| Vote::new(Digest::new([i as u8; 32]), *c, Timestamp::new(index)))
                .collect(),
            proof: 0,
            previous_hash: Digest::ZERO,
            election_name: "Poll".into(),
        }
    }

    #[test]
    fn counts_across_blocks() {
        let chain = vec![
            block(1, &[]),
            block(2, &["Alice", "Bob"]),
            block(3, &["Alice"]),
        ];
        let results = tally("Poll", &candidates(), &chain).unwrap();
        assert_eq!(results.total_votes, 3);
        assert_eq!(results.count_for("Alice"), Some(2));
        assert_eq!(results.count_for("Bob"), Some(1));
        assert_eq!(results.count_for("Charlie"), Some(0));
        assert_eq!(results.winner.as_deref(), Some("Alice"));
        assert!(!results.is_tie());
    }

    #[test]
    fn tie_goes_to_first_listed_candidate() {
        let chain = vec![block(1, &["Bob", "Alice"])];
        let results = tally("Poll", &candidates(), &chain).unwrap();
        assert_eq!(results.winner.as_deref(), Some("Alice"));
        assert!(results.is_tie());
    }

    #[test]
    fn no_votes_means_no_winner() {
        let results = tally("Poll", &candidates(), &[block(1, &[])]).unwrap();
        assert_eq!(results.total_votes, 0);
        assert_eq!(results.winner, None);
        assert!(!results.is_tie());
        assert_eq!(results.counts.len(), 3);
    }

    #[test]
    fn counts_keep_candidate_order() {
        let results = tally("Poll", &candidates(), &[block(1, &["Charlie"])]).unwrap();
        let names: Vec<_> = results.counts.iter().map(|c| c.candidate.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn unknown_candidate_is_reported() {
        let chain = vec![block(1, &[]), block(2, &["Alice", "Mallory"])];
        let err = tally("Poll", &candidates(), &chain).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::UnknownCandidateInChain { ref candidate, block_index: 2 } if candidate == "Mallory"
        ));
    }
}
