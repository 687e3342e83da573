//! Append-only election ledger.
//!
//! Votes are admitted into a pending buffer, then committed in batches as
//! hash-linked blocks. Each block is gated by a proof-of-work over the
//! previous block's proof. Tallying scans the whole chain.
//!
//! The ledger is a single in-memory authority: there is no peer network and
//! no persistence. Callers that share an [`Election`] across threads must
//! serialize mutation themselves (see `votechain-node`).

pub mod block;
pub mod chain;
pub mod election;
pub mod error;
pub mod genesis;
pub mod registry;
pub mod tally;
pub mod vote;

pub use block::Block;
pub use chain::verify_chain;
pub use election::Election;
pub use error::{IntegrityViolation, LedgerError};
pub use genesis::create_genesis_block;
pub use registry::{PendingVotes, VoterRegistry};
pub use tally::{tally, CandidateCount, Results};
pub use vote::Vote;
