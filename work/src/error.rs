use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkError {
    #[error("proof search cancelled")]
    Cancelled,

    #[error("proof search timed out after {elapsed:?}")]
    TimedOut { elapsed: Duration },

    #[error("proof space exhausted without a valid proof")]
    Exhausted,
}
