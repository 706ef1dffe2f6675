//! Core types for the token ledger.

use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 32-byte account address.
pub type Address = [u8; 32];

/// Token amount, represented as a 128-bit unsigned integer.
pub type Balance = u128;

/// Immutable descriptive data of the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Display precision; stored amounts are always integers
    pub decimals: u8,
}

impl TokenMetadata {
    /// Creates new token metadata.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// A record of a successful state change, appended to the ledger's event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Tokens moved from one account to another.
    Transfer {
        /// The debited account
        from: Address,
        /// The credited account
        to: Address,
        /// The amount moved
        amount: Balance,
    },

    /// An owner set the allowance of a spender.
    Approval {
        /// The account whose tokens may be spent
        owner: Address,
        /// The account allowed to spend
        spender: Address,
        /// The new allowance
        amount: Balance,
    },
}

/// Formats an address as `0x`-prefixed lowercase hex.
pub fn format_address(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr))
}

/// Parses a hex address, with or without the `0x` prefix.
pub fn parse_address(s: &str) -> Result<Address, LedgerError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits)
        .map_err(|e| LedgerError::InvalidAddress(format!("{}: {}", s, e)))?;

    if bytes.len() != 32 {
        return Err(LedgerError::InvalidAddress(format!(
            "{}: expected 32 bytes, got {}",
            s,
            bytes.len()
        )));
    }

    let mut addr = [0u8; 32];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

/// Derives an address from a human-readable label (SHA-256 of the label).
pub fn address_from_label(label: &str) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(b"account:");
    hasher.update(label.as_bytes());
    let result = hasher.finalize();
    let mut addr = [0u8; 32];
    addr.copy_from_slice(&result);
    addr
}

/// Parses a token amount from text.
///
/// Only plain non-negative base-10 integers that fit in a [`Balance`] are accepted.
pub fn parse_amount(s: &str) -> Result<Balance, LedgerError> {
    let trimmed = s.trim();
    if trimmed.starts_with('-') {
        return Err(LedgerError::InvalidAmount(format!(
            "{}: amount must be non-negative",
            s
        )));
    }

    trimmed
        .parse::<Balance>()
        .map_err(|e| LedgerError::InvalidAmount(format!("{}: {}", s, e)))
}

impl fmt::Display for TokenMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token {{ name: {}, symbol: {}, decimals: {} }}",
            self.name, self.symbol, self.decimals
        )
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::Transfer { from, to, amount } => write!(
                f,
                "Transfer {{ from: {}, to: {}, amount: {} }}",
                format_address(from),
                format_address(to),
                amount
            ),
            LedgerEvent::Approval { owner, spender, amount } => write!(
                f,
                "Approval {{ owner: {}, spender: {}, amount: {} }}",
                format_address(owner),
                format_address(spender),
                amount
            ),
        }
    }
}
