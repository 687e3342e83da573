//! Fundamental types for the votechain ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! hash digests, timestamps, and chain parameters.

pub mod error;
pub mod hash;
pub mod params;
pub mod time;

pub use error::DigestParseError;
pub use hash::Digest;
pub use params::{ChainParams, Difficulty};
pub use time::Timestamp;
