//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use votechain_types::{ChainParams, Difficulty};
use votechain_work::DEFAULT_BATCH_SIZE;

use crate::{LogFormat, NodeError};

/// Configuration for an election node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Name of the election; stamped into every block.
    #[serde(default = "default_election_name")]
    pub election_name: String,

    /// Candidate names, in ballot order. Ties are broken by this order.
    #[serde(default)]
    pub candidates: Vec<String>,

    /// Length of the voting window, starting at node creation.
    #[serde(default = "default_voting_duration_days")]
    pub voting_duration_days: u64,

    /// Leading hex zeros required of each block proof.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,

    /// Give up a proof search after this many seconds. Unbounded if unset.
    #[serde(default)]
    pub proof_timeout_secs: Option<u64>,

    /// Candidates scanned between cancellation checks.
    #[serde(default = "default_proof_batch_size")]
    pub proof_batch_size: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_election_name() -> String {
    "election".to_string()
}

fn default_voting_duration_days() -> u64 {
    7
}

fn default_difficulty() -> u32 {
    Difficulty::DEFAULT.leading_zeros()
}

fn default_proof_batch_size() -> u64 {
    DEFAULT_BATCH_SIZE
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// Chain parameters derived from this configuration.
    pub fn chain_params(&self) -> ChainParams {
        ChainParams::with_difficulty(Difficulty::new(self.difficulty))
    }

    pub fn proof_timeout(&self) -> Option<Duration> {
        self.proof_timeout_secs.map(Duration::from_secs)
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            election_name: default_election_name(),
            candidates: Vec::new(),
            voting_duration_days: default_voting_duration_days(),
            difficulty: default_difficulty(),
            proof_timeout_secs: None,
            proof_batch_size: default_proof_batch_size(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let mut config = NodeConfig::default();
        config.candidates = vec!["Alice".into(), "Bob".into()];
        config.proof_timeout_secs = Some(30);
        let toml_str = config.to_toml_string();
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.candidates, config.candidates);
        assert_eq!(parsed.proof_timeout_secs, Some(30));
        assert_eq!(parsed.difficulty, config.difficulty);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.voting_duration_days, 7);
        assert_eq!(config.difficulty, 4);
        assert_eq!(config.proof_timeout(), None);
        assert_eq!(config.proof_batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.log_format().unwrap(), LogFormat::Human);
        assert!(config.candidates.is_empty());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            election_name = "Student Council Election"
            candidates = ["Alice", "Bob", "Charlie"]
            difficulty = 2
            proof_timeout_secs = 5
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.election_name, "Student Council Election");
        assert_eq!(config.candidates.len(), 3);
        assert_eq!(config.chain_params().difficulty, Difficulty::new(2));
        assert_eq!(config.proof_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn malformed_toml_returns_config_error() {
        let result = NodeConfig::from_toml_str("difficulty = \"hard\"");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/votechain.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
