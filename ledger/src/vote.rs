//! A single anonymized ballot.

use serde::{Deserialize, Serialize};

use votechain_types::{Digest, Timestamp};

/// One admitted ballot.
///
/// The raw voter id never appears here; only its SHA-256 digest does.
/// Fields are read-only once constructed. Field order is part of the
/// canonical block encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    voter_id: Digest,
    candidate: String,
    timestamp: Timestamp,
}

impl Vote {
    pub fn new(voter_id: Digest, candidate: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            voter_id,
            candidate: candidate.into(),
            timestamp,
        }
    }

    /// Anonymized voter identifier.
    pub fn voter_id(&self) -> &Digest {
        &self.voter_id
    }

    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
