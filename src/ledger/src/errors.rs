//! Error types for the ledger crate.

use thiserror::Error;

/// Errors that can occur in the ledger crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Error when the debited account holds less than the requested amount.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// The requested amount
        required: u128,
        /// The balance of the debited account
        available: u128,
    },

    /// Error when the spender's allowance is less than the requested amount.
    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// The requested amount
        required: u128,
        /// The amount the owner approved
        available: u128,
    },

    /// Error when an amount cannot be parsed as a non-negative integer.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when an address cannot be parsed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when the balances of a ledger state do not add up to its supply.
    #[error("Invalid supply: total supply is {total_supply} but balances sum to {balances}")]
    InvalidSupply {
        /// The declared total supply
        total_supply: u128,
        /// The sum of all balances
        balances: u128,
    },

    /// Error when a snapshot lists the same account or allowance twice.
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Error when a balance computation overflows.
    #[error("Balance overflow")]
    BalanceOverflow,

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error when reading or writing a ledger file fails.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error when the lock around a shared ledger is poisoned.
    #[error("Ledger lock poisoned")]
    LockPoisoned,
}
