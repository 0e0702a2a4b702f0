//! End-to-end ledger tests over the public API
//!
//! Everything here runs against [`MemoryStore`], which honors the same
//! store contracts as the Postgres backend: conditional adjustments with
//! a zero floor, transactional transfer scopes, append-only records.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use corebank::ledger::{LedgerEngine, LedgerError, TransactionRequest};
use corebank::store::{AccountStore, BalanceUpdate, MemoryStore};

/// Engine over a shared in-memory store, default amount ceiling
fn engine_over(store: &MemoryStore) -> LedgerEngine {
    LedgerEngine::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Decimal::from(10_000),
    )
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[tokio::test]
async fn deposit_payout_transfer_flow() {
    let store = MemoryStore::new();
    let engine = engine_over(&store);

    let alice = store.create_account(1).unwrap();
    let bob = store.create_account(2).unwrap();

    // Deposit 500.50 into Alice
    let tx = engine
        .execute(&TransactionRequest::deposit(alice.account_id, dec("500.50")))
        .await
        .expect("deposit should succeed");
    assert_eq!(tx.destination, Some(alice.account_id));
    assert_eq!(tx.source, None);

    // Pay out 120.25
    engine
        .execute(&TransactionRequest::payout(alice.account_id, dec("120.25")))
        .await
        .expect("payout should succeed");

    // Transfer 200 to Bob
    let tx = engine
        .execute(&TransactionRequest::transfer(
            alice.account_id,
            bob.account_id,
            dec("200"),
        ))
        .await
        .expect("transfer should succeed");
    assert_eq!(tx.source, Some(alice.account_id));
    assert_eq!(tx.destination, Some(bob.account_id));

    // Verify balances
    let alice = store.get(alice.account_id).await.unwrap().unwrap();
    let bob = store.get(bob.account_id).await.unwrap().unwrap();
    assert_eq!(alice.balance, dec("180.25"));
    assert_eq!(bob.balance, dec("200"));

    // Verify the record log: one record per applied mutation, in order
    let log = store.transactions().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].kind.as_str(), "Deposit");
    assert_eq!(log[1].kind.as_str(), "Payout");
    assert_eq!(log[2].kind.as_str(), "Transfer");
    assert_eq!(log[2].amount, dec("200"));
}

#[tokio::test]
async fn concurrent_payouts_never_overdraw() {
    let store = MemoryStore::new();
    let engine = Arc::new(engine_over(&store));

    // Setup: balance 1000, 40 tasks each trying to pay out 70.
    // Only floor(1000 / 70) = 14 can fit.
    let account = store
        .create_account_with_balance(1, Decimal::from(1000))
        .unwrap();
    let id = account.account_id;

    let mut handles = Vec::new();
    for _ in 0..40 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine
                .execute(&TransactionRequest::payout(id, Decimal::from(70)))
                .await
        }));
    }

    let mut succeeded = 0;
    let mut insufficient = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(LedgerError::InsufficientFunds) => insufficient += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(succeeded, 14, "exactly floor(1000/70) payouts fit");
    assert_eq!(insufficient, 26);

    let account = store.get(id).await.unwrap().unwrap();
    assert_eq!(account.balance, Decimal::from(1000 - 14 * 70));
    assert!(account.balance >= Decimal::ZERO);

    // One record per applied payout, none for the refused ones
    assert_eq!(store.transactions().unwrap().len(), 14);
}

#[tokio::test]
async fn transfer_to_missing_destination_is_all_or_nothing() {
    let store = MemoryStore::new();
    let engine = engine_over(&store);

    let source = store
        .create_account_with_balance(1, Decimal::from(300))
        .unwrap();
    let ghost = corebank::ledger::AccountId::new();

    let err = engine
        .execute(&TransactionRequest::transfer(
            source.account_id,
            ghost,
            Decimal::from(50),
        ))
        .await
        .expect_err("transfer to a missing account must fail");
    assert!(matches!(err, LedgerError::AccountNotFound(id) if id == ghost));

    // The debit that preceded the failed credit was rolled back
    let source = store.get(source.account_id).await.unwrap().unwrap();
    assert_eq!(source.balance, Decimal::from(300));
    assert!(store.transactions().unwrap().is_empty());
}

#[tokio::test]
async fn underfunded_transfer_leaves_both_sides_untouched() {
    let store = MemoryStore::new();
    let engine = engine_over(&store);

    let source = store
        .create_account_with_balance(1, Decimal::from(10))
        .unwrap();
    let dest = store.create_account(2).unwrap();

    let err = engine
        .execute(&TransactionRequest::transfer(
            source.account_id,
            dest.account_id,
            Decimal::from(500),
        ))
        .await
        .expect_err("underfunded transfer must fail");
    assert!(matches!(err, LedgerError::InsufficientFunds));

    let source = store.get(source.account_id).await.unwrap().unwrap();
    let dest = store.get(dest.account_id).await.unwrap().unwrap();
    assert_eq!(source.balance, Decimal::from(10));
    assert_eq!(dest.balance, Decimal::ZERO);
    assert!(store.transactions().unwrap().is_empty());
}

#[tokio::test]
async fn dropped_transfer_scope_restores_source() {
    let store = MemoryStore::new();

    let source = store
        .create_account_with_balance(1, Decimal::from(100))
        .unwrap();

    // Debit inside a scope, then drop it uncommitted. This is what a
    // cancelled task does: the scope unwinds mid-flight work on drop.
    {
        let mut scope = store.begin_transfer().await.unwrap();
        let update = scope
            .adjust_balance(source.account_id, Decimal::from(-60), Decimal::ZERO)
            .await
            .unwrap();
        assert_eq!(update, BalanceUpdate::Applied);
    }

    let source = store.get(source.account_id).await.unwrap().unwrap();
    assert_eq!(source.balance, Decimal::from(100), "debit must be undone");
    assert!(store.transactions().unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_transfers_conserve_total_money() {
    let store = MemoryStore::new();
    let engine = Arc::new(engine_over(&store));

    // Setup: three accounts, 300 each
    let accounts: Vec<_> = (0..3)
        .map(|i| {
            store
                .create_account_with_balance(i, Decimal::from(300))
                .unwrap()
                .account_id
        })
        .collect();

    // 30 transfers around the ring, all in flight at once. Some may be
    // refused for insufficient funds; what matters is that money is
    // only ever moved, never created or destroyed.
    let mut handles = Vec::new();
    for i in 0..30 {
        let engine = engine.clone();
        let from = accounts[i % 3];
        let to = accounts[(i + 1) % 3];
        handles.push(tokio::spawn(async move {
            engine
                .execute(&TransactionRequest::transfer(from, to, Decimal::from(50)))
                .await
        }));
    }

    let mut applied = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => applied += 1,
            Err(LedgerError::InsufficientFunds) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    let mut total = Decimal::ZERO;
    for id in &accounts {
        let account = store.get(*id).await.unwrap().unwrap();
        assert!(account.balance >= Decimal::ZERO);
        total += account.balance;
    }
    assert_eq!(total, Decimal::from(900), "transfers conserve total money");
    assert_eq!(store.transactions().unwrap().len(), applied);
}

#[tokio::test]
async fn engine_rejects_over_limit_amounts() {
    let store = MemoryStore::new();
    let engine = engine_over(&store);

    let account = store.create_account(1).unwrap();

    let err = engine
        .execute(&TransactionRequest::deposit(
            account.account_id,
            Decimal::from(10_001),
        ))
        .await
        .expect_err("amount above the ceiling must be rejected");
    assert!(matches!(err, LedgerError::Validation { .. }));

    // Rejected before any store access
    let account = store.get(account.account_id).await.unwrap().unwrap();
    assert_eq!(account.balance, Decimal::ZERO);
    assert!(store.transactions().unwrap().is_empty());
}
