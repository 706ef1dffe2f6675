//! Transfer-from command for the token CLI.

use crate::commands::{resolve_account, update_ledger};
use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::types::parse_amount;
use ledger::LedgerEvent;
use tracing::info;

/// Runs the transfer-from command, returning the emitted events.
///
/// `spender` moves `amount` out of `owner`'s balance to `to`.
pub fn run(
    config: &CliConfig,
    spender: &str,
    owner: &str,
    to: &str,
    amount: &str,
) -> Result<Vec<LedgerEvent>, CliError> {
    let spender = resolve_account(spender)?;
    let owner = resolve_account(owner)?;
    let to = resolve_account(to)?;
    let amount = parse_amount(amount)?;
    let emitted = update_ledger(config, |ledger| ledger.transfer_from(&spender, &owner, &to, amount))?;

    info!("Delegated transfer of {} applied", amount);
    Ok(emitted)
}
