//! Thread-safe handle to a token ledger.

use crate::errors::LedgerError;
use crate::ledger::TokenLedger;
use crate::types::{Address, Balance, LedgerEvent, TokenMetadata};
use std::sync::{Arc, Mutex, MutexGuard};

/// A cloneable handle that serializes every call to one [`TokenLedger`].
///
/// Each method takes the lock exactly once, so calls from different threads are
/// applied one at a time and each is all-or-nothing.
#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<Mutex<TokenLedger>>,
}

impl SharedLedger {
    /// Wraps a ledger in a shared handle.
    pub fn new(ledger: TokenLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, TokenLedger>, LedgerError> {
        self.inner.lock().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Returns a copy of the token metadata.
    pub fn metadata(&self) -> Result<TokenMetadata, LedgerError> {
        Ok(self.lock()?.metadata().clone())
    }

    /// Returns the fixed total supply.
    pub fn total_supply(&self) -> Result<Balance, LedgerError> {
        Ok(self.lock()?.total_supply())
    }

    /// Returns the balance of `account`.
    pub fn balance_of(&self, account: &Address) -> Result<Balance, LedgerError> {
        Ok(self.lock()?.balance_of(account))
    }

    /// Returns how much `spender` may still move out of `owner`'s balance.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Result<Balance, LedgerError> {
        Ok(self.lock()?.allowance(owner, spender))
    }

    /// Returns a copy of the event log, oldest first.
    pub fn events(&self) -> Result<Vec<LedgerEvent>, LedgerError> {
        Ok(self.lock()?.events().to_vec())
    }

    /// Moves `amount` tokens from `caller` to `to`.
    pub fn transfer(&self, caller: &Address, to: &Address, amount: Balance) -> Result<(), LedgerError> {
        self.lock()?.transfer(caller, to, amount)
    }

    /// Sets the allowance of `spender` over `caller`'s tokens to `amount`.
    pub fn approve(
        &self,
        caller: &Address,
        spender: &Address,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        self.lock()?.approve(caller, spender, amount)
    }

    /// Moves `amount` tokens from `owner` to `to` on behalf of `caller`.
    pub fn transfer_from(
        &self,
        caller: &Address,
        owner: &Address,
        to: &Address,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        self.lock()?.transfer_from(caller, owner, to, amount)
    }

    /// Runs `f` with exclusive access to the ledger.
    ///
    /// Useful for reading several values from one consistent state.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&TokenLedger) -> R) -> Result<R, LedgerError> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    /// Returns a copy of the current ledger state.
    pub fn to_ledger(&self) -> Result<TokenLedger, LedgerError> {
        Ok(self.lock()?.clone())
    }
}

impl From<TokenLedger> for SharedLedger {
    fn from(ledger: TokenLedger) -> Self {
        Self::new(ledger)
    }
}
