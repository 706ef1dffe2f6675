//! Command-line tool for the ERC20 token ledger.

pub mod commands;
pub mod config;
pub mod errors;

// Re-export commonly used types and functions
pub use commands::{allowance, approve, balance, events, info, init, transfer, transfer_from};
pub use config::{CliConfig, TokenConfig};
pub use errors::CliError;
