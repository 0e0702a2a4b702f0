//! Storage Abstractions
//!
//! The ledger core is storage- and transport-agnostic: it mutates balances
//! and appends records only through these traits. Serialization of
//! concurrent mutations against one account is the store's job, which is
//! what lets multiple server instances share a single database.

pub mod memory;
pub mod postgres;

// Re-export stores for convenient access
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::ledger::error::LedgerError;
use crate::ledger::types::{Account, AccountId, Transaction};

/// Outcome of a conditional balance adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceUpdate {
    /// Adjustment applied atomically
    Applied,
    /// No account with that ID
    NotFound,
    /// Applying would have dropped the balance below the floor;
    /// nothing was changed
    ConditionFailed,
}

/// Account balance primitives
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch an account by ID
    async fn get(&self, id: AccountId) -> Result<Option<Account>, LedgerError>;

    /// Atomically add `delta` to the balance of `id`, as long as the
    /// resulting balance stays at or above `min_resulting`.
    ///
    /// Check and mutation are one store round trip. There is no
    /// read-then-write window for a concurrent request to slip into.
    async fn adjust_balance(
        &self,
        id: AccountId,
        delta: Decimal,
        min_resulting: Decimal,
    ) -> Result<BalanceUpdate, LedgerError>;

    /// Open a transactional scope for a multi-account mutation
    async fn begin_transfer(&self) -> Result<Box<dyn TransferScope>, LedgerError>;
}

/// A transactional scope over account mutations
///
/// Every exit path releases the scope: `commit` makes all adjustments
/// durable as one unit, `abort` undoes them, and dropping an uncommitted
/// scope rolls back. The drop path is what keeps a cancelled task from
/// leaving money in-flight.
#[async_trait]
pub trait TransferScope: Send {
    /// Conditional adjustment inside the scope, same contract as
    /// [`AccountStore::adjust_balance`] but not visible outside the
    /// scope until commit
    async fn adjust_balance(
        &mut self,
        id: AccountId,
        delta: Decimal,
        min_resulting: Decimal,
    ) -> Result<BalanceUpdate, LedgerError>;

    /// Commit all adjustments atomically
    async fn commit(self: Box<Self>) -> Result<(), LedgerError>;

    /// Undo all adjustments
    async fn abort(self: Box<Self>) -> Result<(), LedgerError>;
}

/// Append-only transaction log
///
/// Records are never updated or deleted; nothing in this trait can
/// express either.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Append one record durably
    async fn append(&self, tx: &Transaction) -> Result<(), LedgerError>;
}

/// Mock store for testing failure paths
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Wraps a [`MemoryStore`] with configurable fault injection
    pub struct MockStore {
        pub inner: MemoryStore,
        /// Count of adjust calls (store-level and in-scope)
        adjust_count: AtomicUsize,
        /// Count of append calls
        append_count: AtomicUsize,
        /// Configured behavior
        fail_adjust: AtomicBool,
        fail_append: AtomicBool,
        refuse_credit: AtomicBool,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                adjust_count: AtomicUsize::new(0),
                append_count: AtomicUsize::new(0),
                fail_adjust: AtomicBool::new(false),
                fail_append: AtomicBool::new(false),
                refuse_credit: AtomicBool::new(false),
            }
        }

        /// Every adjust errors as if the store were unreachable
        pub fn set_fail_adjust(&self, fail: bool) {
            self.fail_adjust.store(fail, Ordering::SeqCst);
        }

        /// Every append errors as if the store were unreachable
        pub fn set_fail_append(&self, fail: bool) {
            self.fail_append.store(fail, Ordering::SeqCst);
        }

        /// In-scope credits come back ConditionFailed
        pub fn set_refuse_credit(&self, refuse: bool) {
            self.refuse_credit.store(refuse, Ordering::SeqCst);
        }

        pub fn adjust_count(&self) -> usize {
            self.adjust_count.load(Ordering::SeqCst)
        }

        pub fn append_count(&self) -> usize {
            self.append_count.load(Ordering::SeqCst)
        }
    }

    impl Default for MockStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl AccountStore for MockStore {
        async fn get(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
            self.inner.get(id).await
        }

        async fn adjust_balance(
            &self,
            id: AccountId,
            delta: Decimal,
            min_resulting: Decimal,
        ) -> Result<BalanceUpdate, LedgerError> {
            self.adjust_count.fetch_add(1, Ordering::SeqCst);
            if self.fail_adjust.load(Ordering::SeqCst) {
                return Err(LedgerError::StoreUnavailable(
                    "mock adjust failure".to_string(),
                ));
            }
            self.inner.adjust_balance(id, delta, min_resulting).await
        }

        async fn begin_transfer(&self) -> Result<Box<dyn TransferScope>, LedgerError> {
            let scope = self.inner.begin_transfer().await?;
            Ok(Box::new(MockScope {
                scope,
                refuse_credit: self.refuse_credit.load(Ordering::SeqCst),
            }))
        }
    }

    #[async_trait]
    impl TransactionStore for MockStore {
        async fn append(&self, tx: &Transaction) -> Result<(), LedgerError> {
            self.append_count.fetch_add(1, Ordering::SeqCst);
            if self.fail_append.load(Ordering::SeqCst) {
                return Err(LedgerError::StoreUnavailable(
                    "mock append failure".to_string(),
                ));
            }
            self.inner.append(tx).await
        }
    }

    struct MockScope {
        scope: Box<dyn TransferScope>,
        refuse_credit: bool,
    }

    #[async_trait]
    impl TransferScope for MockScope {
        async fn adjust_balance(
            &mut self,
            id: AccountId,
            delta: Decimal,
            min_resulting: Decimal,
        ) -> Result<BalanceUpdate, LedgerError> {
            if self.refuse_credit && delta > Decimal::ZERO {
                return Ok(BalanceUpdate::ConditionFailed);
            }
            self.scope.adjust_balance(id, delta, min_resulting).await
        }

        async fn commit(self: Box<Self>) -> Result<(), LedgerError> {
            self.scope.commit().await
        }

        async fn abort(self: Box<Self>) -> Result<(), LedgerError> {
            self.scope.abort().await
        }
    }
}

#[cfg(test)]
pub use mock::MockStore;
