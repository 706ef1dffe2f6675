//! Balance command for the token CLI.

use crate::commands::{load_ledger, resolve_account};
use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::Balance;
use tracing::debug;

/// Runs the balance command.
pub fn run(config: &CliConfig, account: &str) -> Result<Balance, CliError> {
    let address = resolve_account(account)?;
    let ledger = load_ledger(config)?;

    let balance = ledger.balance_of(&address);
    debug!("Balance of {}: {}", account, balance);
    Ok(balance)
}
