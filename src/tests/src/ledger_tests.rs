//! Tests for the token ledger.

use ledger::{Address, LedgerError, LedgerEvent, TokenLedger};
use rand::Rng;

const NAME: &str = "Cool Token";
const SYMBOL: &str = "COOL";
const DECIMALS: u8 = 18;
const TOTAL_SUPPLY: u128 = 10000;

/// Accounts used across the tests.
struct Accounts {
    owner: Address,
    other_person: Address,
    other_contract: Address,
}

fn accounts() -> Accounts {
    let mut rng = rand::thread_rng();
    let mut owner = [0u8; 32];
    let mut other_person = [0u8; 32];
    let mut other_contract = [0u8; 32];
    rng.fill(&mut owner);
    rng.fill(&mut other_person);
    rng.fill(&mut other_contract);

    Accounts { owner, other_person, other_contract }
}

fn deploy(accounts: &Accounts) -> TokenLedger {
    TokenLedger::create(NAME, SYMBOL, DECIMALS, TOTAL_SUPPLY, accounts.owner)
}

fn sum_of_balances(ledger: &TokenLedger) -> u128 {
    ledger.accounts().iter().map(|(_, bal)| *bal).sum()
}

/// Tests that construction sets metadata and credits the creator.
#[test]
fn test_initializes_correct_values() {
    let accounts = accounts();
    let token = deploy(&accounts);

    assert_eq!(token.name(), NAME);
    assert_eq!(token.symbol(), SYMBOL);
    assert_eq!(token.total_supply(), TOTAL_SUPPLY);
    assert_eq!(token.decimals(), DECIMALS);
    assert_eq!(token.balance_of(&accounts.owner), TOTAL_SUPPLY);
}

/// Tests a direct transfer and its event.
#[test]
fn test_transfer() {
    let accounts = accounts();
    let mut token = deploy(&accounts);

    token.transfer(&accounts.owner, &accounts.other_person, 100).unwrap();

    assert_eq!(token.balance_of(&accounts.other_person), 100);
    assert_eq!(token.balance_of(&accounts.owner), 9900);
    assert_eq!(
        token.events().last(),
        Some(&LedgerEvent::Transfer {
            from: accounts.owner,
            to: accounts.other_person,
            amount: 100,
        })
    );
}

/// Tests that a transfer above the balance is rejected without side effects.
#[test]
fn test_transfer_rejected_when_balance_too_low() {
    let accounts = accounts();
    let mut token = deploy(&accounts);
    token.transfer(&accounts.owner, &accounts.other_person, 100).unwrap();
    let events_before = token.events().len();

    let result = token.transfer(&accounts.other_person, &accounts.owner, 110);

    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    assert_eq!(token.balance_of(&accounts.other_person), 100);
    assert_eq!(token.balance_of(&accounts.owner), 9900);
    assert_eq!(token.events().len(), events_before);
}

/// Tests that a later approve replaces the earlier allowance.
#[test]
fn test_approve_overwrites_allowance() {
    let accounts = accounts();
    let mut token = deploy(&accounts);

    token.approve(&accounts.owner, &accounts.other_contract, 100).unwrap();
    token.approve(&accounts.owner, &accounts.other_contract, 50).unwrap();

    assert_eq!(token.allowance(&accounts.owner, &accounts.other_contract), 50);
    assert_eq!(
        token.events(),
        &[
            LedgerEvent::Approval {
                owner: accounts.owner,
                spender: accounts.other_contract,
                amount: 100,
            },
            LedgerEvent::Approval {
                owner: accounts.owner,
                spender: accounts.other_contract,
                amount: 50,
            },
        ]
    );
}

/// Tests a delegated transfer consuming the whole allowance.
#[test]
fn test_transfer_from() {
    let accounts = accounts();
    let mut token = deploy(&accounts);

    token.approve(&accounts.owner, &accounts.other_contract, 100).unwrap();
    let events_before = token.events().len();

    token
        .transfer_from(&accounts.other_contract, &accounts.owner, &accounts.other_person, 100)
        .unwrap();

    assert_eq!(token.balance_of(&accounts.other_person), 100);
    assert_eq!(token.balance_of(&accounts.owner), 9900);
    assert_eq!(token.allowance(&accounts.owner, &accounts.other_contract), 0);

    // Only a Transfer event, no Approval for the allowance decrement
    assert_eq!(
        token.events_since(events_before),
        &[LedgerEvent::Transfer {
            from: accounts.owner,
            to: accounts.other_person,
            amount: 100,
        }]
    );
}

/// Tests that a delegated transfer without approval is rejected without side effects.
#[test]
fn test_transfer_from_rejected_without_approval() {
    let accounts = accounts();
    let mut token = deploy(&accounts);

    let result =
        token.transfer_from(&accounts.other_contract, &accounts.owner, &accounts.other_person, 1);

    assert_eq!(
        result,
        Err(LedgerError::InsufficientAllowance { required: 1, available: 0 })
    );
    assert_eq!(token.balance_of(&accounts.owner), TOTAL_SUPPLY);
    assert_eq!(token.balance_of(&accounts.other_person), 0);
    assert_eq!(token.allowance(&accounts.owner, &accounts.other_contract), 0);
    assert!(token.events().is_empty());
}

/// Tests that an allowance cannot be spent twice.
#[test]
fn test_allowance_is_consumed() {
    let accounts = accounts();
    let mut token = deploy(&accounts);

    token.approve(&accounts.owner, &accounts.other_contract, 60).unwrap();
    token
        .transfer_from(&accounts.other_contract, &accounts.owner, &accounts.other_person, 40)
        .unwrap();

    let result =
        token.transfer_from(&accounts.other_contract, &accounts.owner, &accounts.other_person, 40);
    assert_eq!(
        result,
        Err(LedgerError::InsufficientAllowance { required: 40, available: 20 })
    );
    assert_eq!(token.balance_of(&accounts.other_person), 40);
}

/// Tests that an allowance granted by one owner cannot be spent from another.
#[test]
fn test_allowance_bound_to_owner() {
    let accounts = accounts();
    let mut token = deploy(&accounts);
    token.transfer(&accounts.owner, &accounts.other_person, 500).unwrap();
    token.approve(&accounts.owner, &accounts.other_contract, 100).unwrap();

    let result = token.transfer_from(
        &accounts.other_contract,
        &accounts.other_person,
        &accounts.other_contract,
        50,
    );

    assert!(matches!(result, Err(LedgerError::InsufficientAllowance { .. })));
    assert_eq!(token.balance_of(&accounts.other_person), 500);
}

/// Tests that the sum of balances equals the supply after a long mixed run.
#[test]
fn test_conservation() {
    let accounts = accounts();
    let parties = [accounts.owner, accounts.other_person, accounts.other_contract];
    let mut token = deploy(&accounts);
    let mut rng = rand::thread_rng();

    for _ in 0..1000 {
        let a = parties[rng.gen_range(0..parties.len())];
        let b = parties[rng.gen_range(0..parties.len())];
        let c = parties[rng.gen_range(0..parties.len())];
        let amount = rng.gen_range(0..=TOTAL_SUPPLY);

        let _ = match rng.gen_range(0..3) {
            0 => token.transfer(&a, &b, amount),
            1 => token.approve(&a, &b, amount),
            _ => token.transfer_from(&a, &b, &c, amount),
        };

        assert_eq!(sum_of_balances(&token), TOTAL_SUPPLY);
        assert_eq!(token.total_supply(), TOTAL_SUPPLY);
    }
}
