//! In-Memory Store
//!
//! One lock per account, so adjustments against different accounts never
//! contend. Critical sections are synchronous and brief; nothing awaits
//! while a lock is held. A transfer scope keeps an undo log and rolls the
//! applied deltas back on drop, which mirrors how the durable store
//! releases an uncommitted transaction.
//!
//! Backs the engine's concurrency tests and local demo runs; production
//! uses [`super::PgStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{AccountStore, BalanceUpdate, TransactionStore, TransferScope};
use crate::ledger::error::LedgerError;
use crate::ledger::types::{Account, AccountId, Transaction};

type SharedAccount = Arc<Mutex<Account>>;

/// First account number handed out
const ACCOUNT_NUMBER_BASE: i64 = 10_000_001;

struct Inner {
    accounts: Mutex<HashMap<AccountId, SharedAccount>>,
    log: Mutex<Vec<Transaction>>,
    next_number: AtomicI64,
}

/// In-memory account and transaction store
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                accounts: Mutex::new(HashMap::new()),
                log: Mutex::new(Vec::new()),
                next_number: AtomicI64::new(ACCOUNT_NUMBER_BASE),
            }),
        }
    }

    /// Create a zero-balance account owned by `user_id`
    pub fn create_account(&self, user_id: i64) -> Result<Account, LedgerError> {
        self.create_account_with_balance(user_id, Decimal::ZERO)
    }

    /// Create an account pre-funded with `balance`
    pub fn create_account_with_balance(
        &self,
        user_id: i64,
        balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let number = self.inner.next_number.fetch_add(1, Ordering::SeqCst);
        let mut account = Account::new(user_id, number);
        account.balance = balance;

        let mut map = lock(&self.inner.accounts)?;
        map.insert(account.account_id, Arc::new(Mutex::new(account.clone())));
        Ok(account)
    }

    /// Snapshot of every record appended so far, in append order
    pub fn transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(lock(&self.inner.log)?.clone())
    }

    fn entry(&self, id: AccountId) -> Result<Option<SharedAccount>, LedgerError> {
        Ok(lock(&self.inner.accounts)?.get(&id).cloned())
    }

    /// Synchronous conditional adjustment. Shared by the trait methods and
    /// the scope's drop path, which cannot await.
    fn apply(
        &self,
        id: AccountId,
        delta: Decimal,
        min_resulting: Decimal,
    ) -> Result<BalanceUpdate, LedgerError> {
        let Some(entry) = self.entry(id)? else {
            return Ok(BalanceUpdate::NotFound);
        };

        let mut account = lock(&entry)?;
        let resulting = account.balance + delta;
        if resulting < min_resulting {
            return Ok(BalanceUpdate::ConditionFailed);
        }
        account.balance = resulting;
        Ok(BalanceUpdate::Applied)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, LedgerError> {
    mutex
        .lock()
        .map_err(|_| LedgerError::StoreUnavailable("in-memory store lock poisoned".to_string()))
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        match self.entry(id)? {
            Some(entry) => Ok(Some(lock(&entry)?.clone())),
            None => Ok(None),
        }
    }

    async fn adjust_balance(
        &self,
        id: AccountId,
        delta: Decimal,
        min_resulting: Decimal,
    ) -> Result<BalanceUpdate, LedgerError> {
        self.apply(id, delta, min_resulting)
    }

    async fn begin_transfer(&self) -> Result<Box<dyn TransferScope>, LedgerError> {
        Ok(Box::new(MemTransferScope {
            store: self.clone(),
            applied: Vec::new(),
            settled: false,
        }))
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn append(&self, tx: &Transaction) -> Result<(), LedgerError> {
        lock(&self.inner.log)?.push(tx.clone());
        Ok(())
    }
}

/// Transfer scope over the in-memory store
///
/// Adjustments apply immediately; the undo log compensates them if the
/// scope aborts or is dropped uncommitted.
struct MemTransferScope {
    store: MemoryStore,
    /// Deltas applied so far, in application order
    applied: Vec<(AccountId, Decimal)>,
    settled: bool,
}

impl MemTransferScope {
    fn undo(&mut self) {
        // Newest first, so interleaved adjustments to one account unwind
        // in the right order
        while let Some((id, delta)) = self.applied.pop() {
            match self.store.apply(id, -delta, Decimal::ZERO) {
                Ok(BalanceUpdate::Applied) => {}
                other => {
                    tracing::warn!(
                        account_id = %id,
                        delta = %delta,
                        result = ?other,
                        "transfer scope rollback could not undo adjustment"
                    );
                }
            }
        }
    }
}

#[async_trait]
impl TransferScope for MemTransferScope {
    async fn adjust_balance(
        &mut self,
        id: AccountId,
        delta: Decimal,
        min_resulting: Decimal,
    ) -> Result<BalanceUpdate, LedgerError> {
        let update = self.store.apply(id, delta, min_resulting)?;
        if update == BalanceUpdate::Applied {
            self.applied.push((id, delta));
        }
        Ok(update)
    }

    async fn commit(mut self: Box<Self>) -> Result<(), LedgerError> {
        self.applied.clear();
        self.settled = true;
        Ok(())
    }

    async fn abort(mut self: Box<Self>) -> Result<(), LedgerError> {
        self.undo();
        self.settled = true;
        Ok(())
    }
}

impl Drop for MemTransferScope {
    fn drop(&mut self) {
        if !self.settled {
            self.undo();
        }
    }
}
