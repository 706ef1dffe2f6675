//! Fixed-supply ERC20 token ledger.
//!
//! This crate provides the account model for a single fungible token: balances,
//! delegated-spending allowances, the ordered event log, snapshot persistence and
//! a thread-safe handle for hosts that call the ledger from several threads.

pub mod errors;
pub mod ledger;
pub mod shared;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use errors::LedgerError;
pub use ledger::TokenLedger;
pub use shared::SharedLedger;
pub use store::{LedgerSnapshot, LedgerStore, StoreLock};
pub use types::{Address, Balance, LedgerEvent, TokenMetadata};
