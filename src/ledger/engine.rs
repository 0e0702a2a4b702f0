//! Ledger Engine
//!
//! Orchestrates deposit, payout and transfer over the store primitives.
//! The engine holds no mutable state of its own; serialization of
//! concurrent mutations against one account is delegated to the store,
//! so any number of engine instances can run against the same database.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::LedgerError;
use super::recorder::TransactionRecorder;
use super::types::{AccountId, LedgerOp, Transaction, TransactionRequest, TransferPhase};
use super::validator::TransactionValidator;
use crate::store::{AccountStore, BalanceUpdate, TransactionStore, TransferScope};

/// Executes validated transactions against the account store
pub struct LedgerEngine {
    accounts: Arc<dyn AccountStore>,
    validator: TransactionValidator,
    recorder: TransactionRecorder,
}

impl LedgerEngine {
    /// Create a new engine over the given stores
    ///
    /// `max_amount` is the per-transaction ceiling enforced by the
    /// validator.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        transactions: Arc<dyn TransactionStore>,
        max_amount: Decimal,
    ) -> Self {
        Self {
            accounts,
            validator: TransactionValidator::new(max_amount),
            recorder: TransactionRecorder::new(transactions),
        }
    }

    /// Execute a transaction request end to end
    ///
    /// Validation runs before any store access. The record is appended
    /// only after the balance mutation committed; a record failure
    /// surfaces as [`LedgerError::RecordingFailed`] with the mutation
    /// kept.
    pub async fn execute(&self, req: &TransactionRequest) -> Result<Transaction, LedgerError> {
        // 1. Shape checks - pure, no store round trips
        let op = self.validator.validate(req)?;

        // 2. Balance mutation through the store primitives
        self.apply(&op).await?;

        // 3. Append the immutable record
        self.recorder.record(&op).await
    }

    async fn apply(&self, op: &LedgerOp) -> Result<(), LedgerError> {
        match *op {
            LedgerOp::Deposit {
                destination,
                amount,
            } => self.deposit(destination, amount).await,
            LedgerOp::Payout { source, amount } => self.payout(source, amount).await,
            LedgerOp::Transfer {
                source,
                destination,
                amount,
            } => self.transfer(source, destination, amount).await,
        }
    }

    /// Unconditional credit to one account
    async fn deposit(&self, destination: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        match self
            .accounts
            .adjust_balance(destination, amount, Decimal::ZERO)
            .await?
        {
            BalanceUpdate::Applied => {
                debug!(account_id = %destination, amount = %amount, "deposit applied");
                Ok(())
            }
            BalanceUpdate::NotFound => Err(LedgerError::AccountNotFound(destination)),
            BalanceUpdate::ConditionFailed => {
                // A credit to a non-negative balance cannot cross the
                // zero floor; the store broke its own contract
                Err(LedgerError::StoreUnavailable(
                    "store refused a deposit credit".to_string(),
                ))
            }
        }
    }

    /// Conditional debit from one account, floor zero
    ///
    /// Check and decrement are one atomic store operation. Two payouts
    /// racing for the same balance serialize inside the store; the loser
    /// sees ConditionFailed, never a negative balance.
    async fn payout(&self, source: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        match self
            .accounts
            .adjust_balance(source, -amount, Decimal::ZERO)
            .await?
        {
            BalanceUpdate::Applied => {
                debug!(account_id = %source, amount = %amount, "payout applied");
                Ok(())
            }
            BalanceUpdate::NotFound => Err(LedgerError::AccountNotFound(source)),
            BalanceUpdate::ConditionFailed => Err(LedgerError::InsufficientFunds),
        }
    }

    /// Debit source and credit destination as one unit
    ///
    /// Both mutations run inside one store scope. Every failure path
    /// aborts the scope, so the debit is never observable without the
    /// credit.
    async fn transfer(
        &self,
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let mut scope = self.accounts.begin_transfer().await?;
        debug!(
            source = %source,
            destination = %destination,
            amount = %amount,
            phase = %TransferPhase::Pending,
            "transfer started"
        );

        // 1. Conditional source debit
        match scope.adjust_balance(source, -amount, Decimal::ZERO).await {
            Ok(BalanceUpdate::Applied) => {}
            Ok(BalanceUpdate::NotFound) => {
                return Self::rollback(scope, LedgerError::AccountNotFound(source)).await;
            }
            Ok(BalanceUpdate::ConditionFailed) => {
                return Self::rollback(scope, LedgerError::InsufficientFunds).await;
            }
            Err(e) => return Self::rollback(scope, e).await,
        }
        debug!(source = %source, phase = %TransferPhase::SourceDebited, "transfer source debited");

        // 2. Destination credit inside the same scope
        match scope.adjust_balance(destination, amount, Decimal::ZERO).await {
            Ok(BalanceUpdate::Applied) => {}
            Ok(BalanceUpdate::NotFound) => {
                return Self::rollback(scope, LedgerError::AccountNotFound(destination)).await;
            }
            Ok(BalanceUpdate::ConditionFailed) => {
                // Crediting an existing account cannot legitimately fail
                // the floor. Treat as a store fault; the abort leaves no
                // partial state, so the caller may retry.
                return Self::rollback(
                    scope,
                    LedgerError::StoreUnavailable(
                        "store refused the destination credit".to_string(),
                    ),
                )
                .await;
            }
            Err(e) => return Self::rollback(scope, e).await,
        }

        // 3. Commit both mutations as one unit
        scope.commit().await?;
        info!(
            source = %source,
            destination = %destination,
            amount = %amount,
            phase = %TransferPhase::Committed,
            "transfer committed"
        );
        Ok(())
    }

    /// Abort the scope and surface `error`
    ///
    /// An abort failure is logged, not returned: the store discards an
    /// unreleased scope either way, and `error` is what the caller needs
    /// to see.
    async fn rollback(
        scope: Box<dyn TransferScope>,
        error: LedgerError,
    ) -> Result<(), LedgerError> {
        if let Err(abort_err) = scope.abort().await {
            warn!(
                error = %abort_err,
                "transfer scope abort failed; store will discard the open transaction"
            );
        }
        debug!(phase = %TransferPhase::RolledBack, error = %error, "transfer rolled back");
        Err(error)
    }
}
