//! Block-gating proof-of-work.
//!
//! A new block may only be appended once a proof has been found whose digest,
//! taken together with the previous block's proof, starts with a fixed run of
//! hexadecimal zeros. The search cost is what makes rewriting history
//! expensive; the difficulty is static for the life of an election.

pub mod cancel;
pub mod error;
pub mod generator;
pub mod validator;

pub use cancel::CancelToken;
pub use error::WorkError;
pub use generator::{ProofGenerator, DEFAULT_BATCH_SIZE};
pub use validator::{is_valid_proof, leading_zero_nibbles, proof_digest, validate_proof};
