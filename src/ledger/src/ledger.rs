//! The token ledger: balances, allowances and the event log of a single ERC20 token.

use crate::errors::LedgerError;
use crate::types::{format_address, Address, Balance, LedgerEvent, TokenMetadata};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// A fixed-supply fungible token ledger.
///
/// The whole supply is credited to the creator at construction. Afterwards tokens
/// only move between accounts, so the sum of all balances always equals
/// [`TokenLedger::total_supply`]. Every mutating operation checks all of its
/// preconditions before touching state: a rejected call leaves balances, allowances
/// and the event log exactly as they were.
#[derive(Clone)]
pub struct TokenLedger {
    /// Name, symbol and decimals
    pub(crate) metadata: TokenMetadata,
    /// The fixed total supply
    pub(crate) total_supply: Balance,
    /// Balance by account; absent means zero
    pub(crate) balances: HashMap<Address, Balance>,
    /// Allowance by (owner, spender); absent means zero
    pub(crate) allowances: HashMap<(Address, Address), Balance>,
    /// Append-only log of successful state changes
    pub(crate) events: Vec<LedgerEvent>,
}

impl TokenLedger {
    /// Creates a new ledger and credits the entire supply to `creator`.
    ///
    /// A zero supply is accepted and yields an empty ledger.
    pub fn create(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        total_supply: Balance,
        creator: Address,
    ) -> Self {
        let metadata = TokenMetadata::new(name, symbol, decimals);
        info!(
            "Creating token {} ({}) with supply {} for {}",
            metadata.name,
            metadata.symbol,
            total_supply,
            format_address(&creator)
        );

        let mut balances = HashMap::new();
        balances.insert(creator, total_supply);

        Self {
            metadata,
            total_supply,
            balances,
            allowances: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Returns the token metadata.
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Returns the token name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Returns the token symbol.
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Returns the display precision.
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Returns the fixed total supply.
    pub fn total_supply(&self) -> Balance {
        self.total_supply
    }

    /// Returns the balance of `account`, zero if it never held tokens.
    pub fn balance_of(&self, account: &Address) -> Balance {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Returns how much `spender` may still move out of `owner`'s balance.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Balance {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the events emitted so far, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Returns the events emitted after the first `start` events.
    pub fn events_since(&self, start: usize) -> &[LedgerEvent] {
        self.events.get(start..).unwrap_or(&[])
    }

    /// Returns a copy of every known account and its balance, sorted by address.
    pub fn accounts(&self) -> Vec<(Address, Balance)> {
        let mut accounts: Vec<(Address, Balance)> =
            self.balances.iter().map(|(addr, bal)| (*addr, *bal)).collect();
        accounts.sort();
        accounts
    }

    /// Moves `amount` tokens from `caller` to `to`.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance` if `caller` holds less than `amount`.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        if let Err(e) = self.move_balance(caller, to, amount) {
            warn!("Rejected transfer from {}: {}", format_address(caller), e);
            return Err(e);
        }

        debug!(
            "Transferred {} from {} to {}",
            amount,
            format_address(caller),
            format_address(to)
        );
        self.events.push(LedgerEvent::Transfer {
            from: *caller,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Sets the allowance of `spender` over `caller`'s tokens to `amount`.
    ///
    /// The new value replaces the previous one; it is not added to it. The amount may
    /// exceed `caller`'s current balance.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        self.allowances.insert((*caller, *spender), amount);

        debug!(
            "Approved {} to spend {} of {}",
            format_address(spender),
            amount,
            format_address(caller)
        );
        self.events.push(LedgerEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        });
        Ok(())
    }

    /// Moves `amount` tokens from `owner` to `to` on behalf of `caller`, consuming
    /// `caller`'s allowance.
    ///
    /// No `Approval` event is emitted for the allowance decrement.
    ///
    /// # Errors
    ///
    /// `InsufficientAllowance` if `owner` approved `caller` for less than `amount`,
    /// otherwise `InsufficientBalance` if `owner` holds less than `amount`.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        owner: &Address,
        to: &Address,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance(owner, caller);
        if allowed < amount {
            let e = LedgerError::InsufficientAllowance {
                required: amount,
                available: allowed,
            };
            warn!(
                "Rejected delegated transfer by {} from {}: {}",
                format_address(caller),
                format_address(owner),
                e
            );
            return Err(e);
        }

        // The allowance is only written once the balances have moved.
        if let Err(e) = self.move_balance(owner, to, amount) {
            warn!(
                "Rejected delegated transfer by {} from {}: {}",
                format_address(caller),
                format_address(owner),
                e
            );
            return Err(e);
        }
        self.allowances.insert((*owner, *caller), allowed - amount);

        debug!(
            "{} transferred {} from {} to {}",
            format_address(caller),
            amount,
            format_address(owner),
            format_address(to)
        );
        self.events.push(LedgerEvent::Transfer {
            from: *owner,
            to: *to,
            amount,
        });
        Ok(())
    }

    /// Sums all balances.
    pub(crate) fn balance_sum(balances: &HashMap<Address, Balance>) -> Result<Balance, LedgerError> {
        balances
            .values()
            .try_fold(0u128, |acc, bal| acc.checked_add(*bal))
            .ok_or(LedgerError::BalanceOverflow)
    }

    /// Debits `from` and credits `to`, or changes nothing if either step would fail.
    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        let from_bal = self.balance_of(from);
        if from_bal < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: from_bal,
            });
        }

        // Self transfer: the balance check applies, the balance does not change.
        if from == to {
            return Ok(());
        }

        let new_from = from_bal - amount;
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        self.balances.insert(*from, new_from);
        self.balances.insert(*to, new_to);
        Ok(())
    }
}

impl fmt::Debug for TokenLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenLedger")
            .field("metadata", &self.metadata)
            .field("total_supply", &self.total_supply)
            .field("accounts", &self.balances.len())
            .field("allowances", &self.allowances.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl fmt::Display for TokenLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {{ decimals: {}, total_supply: {}, accounts: {} }}",
            self.metadata.name,
            self.metadata.symbol,
            self.metadata.decimals,
            self.total_supply,
            self.balances.len()
        )
    }
}
