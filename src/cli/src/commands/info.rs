//! Info command for the token CLI.

use crate::commands::load_ledger;
use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::{Balance, TokenMetadata};

/// Summary of a ledger.
#[derive(Debug, Clone)]
pub struct LedgerInfo {
    /// Token name, symbol and decimals
    pub metadata: TokenMetadata,
    /// The fixed total supply
    pub total_supply: Balance,
    /// Accounts that have ever held a balance entry
    pub accounts: usize,
    /// Number of events in the log
    pub events: usize,
}

/// Runs the info command.
pub fn run(config: &CliConfig) -> Result<LedgerInfo, CliError> {
    let ledger = load_ledger(config)?;

    Ok(LedgerInfo {
        metadata: ledger.metadata().clone(),
        total_supply: ledger.total_supply(),
        accounts: ledger.accounts().len(),
        events: ledger.events().len(),
    })
}
