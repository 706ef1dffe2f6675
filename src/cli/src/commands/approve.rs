//! Approve command for the token CLI.

use crate::commands::{resolve_account, update_ledger};
use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::types::parse_amount;
use ledger::LedgerEvent;
use tracing::info;

/// Runs the approve command, returning the emitted events.
pub fn run(
    config: &CliConfig,
    owner: &str,
    spender: &str,
    amount: &str,
) -> Result<Vec<LedgerEvent>, CliError> {
    let owner = resolve_account(owner)?;
    let spender = resolve_account(spender)?;
    let amount = parse_amount(amount)?;
    let emitted = update_ledger(config, |ledger| ledger.approve(&owner, &spender, amount))?;

    info!("Allowance set to {}", amount);
    Ok(emitted)
}
