//! Snapshot persistence for the token ledger.

use crate::errors::LedgerError;
use crate::ledger::TokenLedger;
use crate::types::{format_address, Address, Balance, LedgerEvent, TokenMetadata};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A serializable copy of the complete ledger state.
///
/// Tables are stored as vectors sorted by key so that equal states encode to equal
/// bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Name, symbol and decimals
    pub metadata: TokenMetadata,
    /// The fixed total supply
    pub total_supply: Balance,
    /// Balance by account
    pub balances: Vec<(Address, Balance)>,
    /// Allowance by (owner, spender)
    pub allowances: Vec<((Address, Address), Balance)>,
    /// Event log, oldest first
    pub events: Vec<LedgerEvent>,
}

impl TokenLedger {
    /// Captures the current state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut allowances: Vec<((Address, Address), Balance)> = self
            .allowances
            .iter()
            .map(|(key, amount)| (*key, *amount))
            .collect();
        allowances.sort();

        LedgerSnapshot {
            metadata: self.metadata.clone(),
            total_supply: self.total_supply,
            balances: self.accounts(),
            allowances,
            events: self.events.clone(),
        }
    }

    /// Rebuilds a ledger from a snapshot.
    ///
    /// # Errors
    ///
    /// `DuplicateEntry` if an account or an (owner, spender) pair appears twice,
    /// `InvalidSupply` if the balances do not sum to the total supply.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        let mut balances = HashMap::with_capacity(snapshot.balances.len());
        for (addr, bal) in snapshot.balances {
            if balances.insert(addr, bal).is_some() {
                return Err(LedgerError::DuplicateEntry(format!(
                    "balance of {}",
                    format_address(&addr)
                )));
            }
        }

        let mut allowances = HashMap::with_capacity(snapshot.allowances.len());
        for ((owner, spender), amount) in snapshot.allowances {
            if allowances.insert((owner, spender), amount).is_some() {
                return Err(LedgerError::DuplicateEntry(format!(
                    "allowance of {} for {}",
                    format_address(&owner),
                    format_address(&spender)
                )));
            }
        }

        let sum = TokenLedger::balance_sum(&balances)?;
        if sum != snapshot.total_supply {
            return Err(LedgerError::InvalidSupply {
                total_supply: snapshot.total_supply,
                balances: sum,
            });
        }

        Ok(Self {
            metadata: snapshot.metadata,
            total_supply: snapshot.total_supply,
            balances,
            allowances,
            events: snapshot.events,
        })
    }
}

/// A file holding one bincode-encoded [`LedgerSnapshot`].
///
/// Saves go through a temporary file renamed over the ledger file, so readers see
/// either the old or the new state. Writers that may race with each other
/// serialize through [`LedgerStore::lock`], which [`LedgerStore::update`] takes for
/// the whole load, apply and save cycle.
#[derive(Clone, Debug)]
pub struct LedgerStore {
    path: PathBuf,
}

/// An exclusive lock on a [`LedgerStore`], released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Appends `suffix` to the file name of `path`.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

impl LedgerStore {
    /// Creates a store backed by the file at `path`. The file need not exist yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether a ledger has been saved to this store.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn create_parent_dir(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::StorageError(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Blocks until this process holds the store's exclusive lock.
    ///
    /// The lock lives in a `.lock` file next to the ledger file and covers other
    /// threads and other processes alike.
    pub fn lock(&self) -> Result<StoreLock, LedgerError> {
        self.create_parent_dir()?;

        let lock_path = sibling_path(&self.path, ".lock");
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| {
                LedgerError::StorageError(format!("Failed to open {}: {}", lock_path.display(), e))
            })?;

        FileExt::lock_exclusive(&file).map_err(|e| {
            LedgerError::StorageError(format!("Failed to lock {}: {}", lock_path.display(), e))
        })?;

        debug!("Locked {}", lock_path.display());
        Ok(StoreLock { file })
    }

    /// Writes the ledger, creating parent directories as needed.
    ///
    /// The file is replaced atomically; concurrent writers must hold [`LedgerStore::lock`].
    pub fn save(&self, ledger: &TokenLedger) -> Result<(), LedgerError> {
        let bytes = bincode::serialize(&ledger.snapshot())
            .map_err(|e| LedgerError::SerializationError(e.to_string()))?;

        self.create_parent_dir()?;

        let tmp_path = sibling_path(&self.path, ".tmp");
        fs::write(&tmp_path, bytes).map_err(|e| {
            LedgerError::StorageError(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            LedgerError::StorageError(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!("Saved ledger to {}", self.path.display());
        Ok(())
    }

    /// Reads the ledger back.
    pub fn load(&self) -> Result<TokenLedger, LedgerError> {
        let bytes = fs::read(&self.path).map_err(|e| {
            LedgerError::StorageError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let snapshot: LedgerSnapshot = bincode::deserialize(&bytes)
            .map_err(|e| LedgerError::SerializationError(e.to_string()))?;

        let ledger = TokenLedger::from_snapshot(snapshot)?;
        info!("Loaded ledger from {}", self.path.display());
        Ok(ledger)
    }

    /// Applies `f` to the stored ledger under the store lock and saves the result.
    ///
    /// If `f` fails nothing is written, so the stored state is unchanged.
    pub fn update<R, F>(&self, f: F) -> Result<R, LedgerError>
    where
        F: FnOnce(&mut TokenLedger) -> Result<R, LedgerError>,
    {
        let _lock = self.lock()?;
        let mut ledger = self.load()?;
        let result = f(&mut ledger)?;
        self.save(&ledger)?;
        Ok(result)
    }
}
