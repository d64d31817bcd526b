use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Index {index} is out of range (ledger holds {len} transactions)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures that stop the shell itself rather than a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}
