use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] votechain_ledger::LedgerError),

    #[error("proof of work error: {0}")]
    Work(#[from] votechain_work::WorkError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("background task failed: {0}")]
    Join(String),
}
