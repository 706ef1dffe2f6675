//! Init command for the token CLI.

use crate::commands::resolve_account;
use crate::config::{CliConfig, TokenConfig};
use crate::errors::CliError;
use ledger::{Address, LedgerStore, TokenLedger};
use tracing::info;

/// Runs the init command.
///
/// Creates a ledger crediting the whole supply to `creator` and saves it. An
/// existing ledger file is never overwritten.
pub fn run(config: &CliConfig, token: &TokenConfig, creator: &str) -> Result<Address, CliError> {
    let store = LedgerStore::new(&config.state_file);
    let _lock = store.lock()?;
    if store.exists() {
        return Err(CliError::AlreadyInitialized(
            store.path().display().to_string(),
        ));
    }

    let creator = resolve_account(creator)?;
    let ledger = TokenLedger::create(
        token.name.clone(),
        token.symbol.clone(),
        token.decimals,
        token.total_supply,
        creator,
    );
    store.save(&ledger)?;

    info!("Initialized ledger at {}", store.path().display());
    Ok(creator)
}
