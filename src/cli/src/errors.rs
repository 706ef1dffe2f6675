//! Error types for the token CLI.

use ledger::LedgerError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the token CLI.
#[derive(Debug)]
pub enum CliError {
    /// Error when a ledger operation fails.
    LedgerError(LedgerError),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when `init` would overwrite an existing ledger.
    AlreadyInitialized(String),

    /// Error when no ledger has been initialized yet.
    NotInitialized(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LedgerError(e) => write!(f, "Ledger error: {}", e),
            CliError::JsonError(e) => write!(f, "JSON error: {}", e),
            CliError::AlreadyInitialized(path) => {
                write!(f, "Ledger already initialized at {}", path)
            }
            CliError::NotInitialized(path) => {
                write!(f, "No ledger found at {}, run `token init` first", path)
            }
        }
    }
}

impl StdError for CliError {}

impl From<LedgerError> for CliError {
    fn from(error: LedgerError) -> Self {
        CliError::LedgerError(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::JsonError(error)
    }
}
