//! Transaction Recorder
//!
//! Turns an executed operation into its immutable record. Called only
//! after the balance mutation durably succeeded; a failure here means the
//! books moved without a record, which is alert-worthy.

use std::sync::Arc;

use tracing::{debug, error};

use super::error::LedgerError;
use super::types::{LedgerOp, Transaction};
use crate::store::TransactionStore;

/// Builds and persists transaction records
pub struct TransactionRecorder {
    store: Arc<dyn TransactionStore>,
}

impl TransactionRecorder {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Persist the record for an operation whose mutation already
    /// committed.
    ///
    /// Any store failure is classified [`LedgerError::RecordingFailed`]:
    /// the mutation is not undone, the gap is surfaced to the caller and
    /// logged at error level.
    pub async fn record(&self, op: &LedgerOp) -> Result<Transaction, LedgerError> {
        let tx = Transaction::for_op(op);

        if let Err(e) = self.store.append(&tx).await {
            error!(
                transaction_id = %tx.transaction_id,
                kind = %tx.kind,
                amount = %tx.amount,
                error = %e,
                "balance mutation committed but the record was not persisted"
            );
            return Err(LedgerError::RecordingFailed(e.to_string()));
        }

        debug!(transaction_id = %tx.transaction_id, kind = %tx.kind, "transaction recorded");
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::AccountId;
    use crate::store::{MemoryStore, MockStore};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_record_appends_once() {
        let store = Arc::new(MemoryStore::new());
        let recorder = TransactionRecorder::new(store.clone());

        let op = LedgerOp::Deposit {
            destination: AccountId::new(),
            amount: Decimal::from(10),
        };
        let tx = recorder.record(&op).await.unwrap();

        let log = store.transactions().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].transaction_id, tx.transaction_id);
        assert_eq!(log[0].amount, Decimal::from(10));
    }

    #[tokio::test]
    async fn test_append_failure_classified() {
        let store = Arc::new(MockStore::new());
        store.set_fail_append(true);
        let recorder = TransactionRecorder::new(store.clone());

        let op = LedgerOp::Payout {
            source: AccountId::new(),
            amount: Decimal::from(10),
        };
        let err = recorder.record(&op).await.unwrap_err();
        assert_eq!(err.code(), "RECORDING_FAILED");
        assert_eq!(store.append_count(), 1);
    }
}
