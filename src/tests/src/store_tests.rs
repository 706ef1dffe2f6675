//! Tests for ledger persistence.

use ledger::{LedgerError, LedgerEvent, LedgerStore, TokenLedger};
use tempfile::tempdir;

/// Tests that a saved ledger keeps working after it is loaded back.
#[test]
fn test_reload_and_continue() {
    let dir = tempdir().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.bin"));

    let owner = [1u8; 32];
    let spender = [2u8; 32];
    let other = [3u8; 32];

    let mut token = TokenLedger::create("Cool Token", "COOL", 18, 10000, owner);
    token.approve(&owner, &spender, 100).unwrap();
    store.save(&token).unwrap();

    let mut reloaded = store.load().unwrap();
    reloaded.transfer_from(&spender, &owner, &other, 100).unwrap();
    store.save(&reloaded).unwrap();

    let last = store.load().unwrap();
    assert_eq!(last.name(), "Cool Token");
    assert_eq!(last.balance_of(&other), 100);
    assert_eq!(last.balance_of(&owner), 9900);
    assert_eq!(last.allowance(&owner, &spender), 0);
    assert_eq!(
        last.events(),
        &[
            LedgerEvent::Approval { owner, spender, amount: 100 },
            LedgerEvent::Transfer { from: owner, to: other, amount: 100 },
        ]
    );
}

/// Tests that equal states encode to equal snapshots.
#[test]
fn test_snapshot_is_deterministic() {
    let owner = [1u8; 32];
    let mut a = TokenLedger::create("Cool Token", "COOL", 18, 10000, owner);
    for i in 2..20u8 {
        a.transfer(&owner, &[i; 32], i as u128).unwrap();
        a.approve(&owner, &[i; 32], 1).unwrap();
    }
    let b = TokenLedger::from_snapshot(a.snapshot()).unwrap();

    assert_eq!(a.snapshot(), b.snapshot());
}

/// Tests that a tampered snapshot cannot be loaded.
#[test]
fn test_tampered_snapshot_rejected() {
    let owner = [1u8; 32];
    let token = TokenLedger::create("Cool Token", "COOL", 18, 10000, owner);

    let mut snapshot = token.snapshot();
    snapshot.total_supply = 20000;

    assert!(matches!(
        TokenLedger::from_snapshot(snapshot),
        Err(LedgerError::InvalidSupply { total_supply: 20000, balances: 10000 })
    ));
}

/// Tests that a snapshot listing one account twice cannot be loaded.
#[test]
fn test_duplicate_account_rejected() {
    let owner = [1u8; 32];
    let mut token = TokenLedger::create("Cool Token", "COOL", 18, 10000, owner);
    token.transfer(&owner, &[2u8; 32], 4000).unwrap();

    let mut snapshot = token.snapshot();
    snapshot.balances = vec![(owner, 6000), (owner, 4000)];

    assert!(matches!(
        TokenLedger::from_snapshot(snapshot),
        Err(LedgerError::DuplicateEntry(_))
    ));
}
