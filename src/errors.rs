use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid amount `{0}`: expected a non-negative number")]
    InvalidAmount(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
