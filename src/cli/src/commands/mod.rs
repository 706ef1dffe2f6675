//! Commands for the token CLI.

pub mod allowance;
pub mod approve;
pub mod balance;
pub mod events;
pub mod info;
pub mod init;
pub mod transfer;
pub mod transfer_from;

use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::types::{address_from_label, parse_address};
use ledger::{Address, LedgerError, LedgerEvent, LedgerStore, TokenLedger};

/// Resolves an account argument.
///
/// `0x`-prefixed arguments are parsed as hex addresses, anything else is treated as
/// a label and hashed into an address.
pub fn resolve_account(account: &str) -> Result<Address, CliError> {
    if account.starts_with("0x") {
        Ok(parse_address(account)?)
    } else {
        Ok(address_from_label(account))
    }
}

fn initialized_store(config: &CliConfig) -> Result<LedgerStore, CliError> {
    let store = LedgerStore::new(&config.state_file);
    if !store.exists() {
        return Err(CliError::NotInitialized(
            store.path().display().to_string(),
        ));
    }
    Ok(store)
}

/// Loads the ledger named by the configuration.
pub(crate) fn load_ledger(config: &CliConfig) -> Result<TokenLedger, CliError> {
    Ok(initialized_store(config)?.load()?)
}

/// Applies `op` to the stored ledger under the store lock and returns the events it
/// emitted. Nothing is saved when `op` fails.
pub(crate) fn update_ledger<F>(config: &CliConfig, op: F) -> Result<Vec<LedgerEvent>, CliError>
where
    F: FnOnce(&mut TokenLedger) -> Result<(), LedgerError>,
{
    let store = initialized_store(config)?;
    let emitted = store.update(|ledger| {
        let before = ledger.events().len();
        op(ledger)?;
        Ok(ledger.events_since(before).to_vec())
    })?;
    Ok(emitted)
}
