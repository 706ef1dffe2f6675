//! Transfer command for the token CLI.

use crate::commands::{resolve_account, update_ledger};
use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::types::parse_amount;
use ledger::LedgerEvent;
use tracing::info;

/// Runs the transfer command, returning the emitted events.
pub fn run(
    config: &CliConfig,
    from: &str,
    to: &str,
    amount: &str,
) -> Result<Vec<LedgerEvent>, CliError> {
    let from = resolve_account(from)?;
    let to = resolve_account(to)?;
    let amount = parse_amount(amount)?;
    let emitted = update_ledger(config, |ledger| ledger.transfer(&from, &to, amount))?;

    info!("Transfer of {} applied", amount);
    Ok(emitted)
}
