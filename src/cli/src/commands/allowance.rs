//! Allowance command for the token CLI.

use crate::commands::{load_ledger, resolve_account};
use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::Balance;

/// Runs the allowance command.
pub fn run(config: &CliConfig, owner: &str, spender: &str) -> Result<Balance, CliError> {
    let owner = resolve_account(owner)?;
    let spender = resolve_account(spender)?;
    let ledger = load_ledger(config)?;

    Ok(ledger.allowance(&owner, &spender))
}
