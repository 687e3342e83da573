//! votechain node — a single in-memory election authority.
//!
//! The node owns one [`Election`](votechain_ledger::Election) behind an async
//! read/write lock:
//! - Vote admission and block creation take the write lock, one at a time
//! - Tallying and chain reads share the read lock
//! - Proof search runs on the blocking pool, outside any lock, bounded by a
//!   timeout and the node's shutdown signal

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::ElectionNode;
