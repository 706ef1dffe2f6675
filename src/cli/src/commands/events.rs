//! Events command for the token CLI.

use crate::commands::load_ledger;
use crate::config::CliConfig;
use crate::errors::CliError;
use ledger::types::format_address;
use ledger::LedgerEvent;
use serde_json::{json, Value};

/// Runs the events command, returning the events after the first `since`.
pub fn run(config: &CliConfig, since: usize) -> Result<Vec<LedgerEvent>, CliError> {
    let ledger = load_ledger(config)?;
    Ok(ledger.events_since(since).to_vec())
}

/// Renders events as pretty-printed JSON with hex addresses.
///
/// Amounts are strings since they may exceed the integer range of JSON readers.
pub fn to_json(events: &[LedgerEvent]) -> Result<String, CliError> {
    let rendered: Vec<Value> = events
        .iter()
        .map(|event| match event {
            LedgerEvent::Transfer { from, to, amount } => json!({
                "event": "Transfer",
                "from": format_address(from),
                "to": format_address(to),
                "amount": amount.to_string(),
            }),
            LedgerEvent::Approval { owner, spender, amount } => json!({
                "event": "Approval",
                "owner": format_address(owner),
                "spender": format_address(spender),
                "amount": amount.to_string(),
            }),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rendered)?)
}
