//! Ledger Error Types
//!
//! The fixed error taxonomy every engine failure is classified into.

use thiserror::Error;

use super::types::AccountId;

/// Ledger error taxonomy
///
/// All variants are terminal for the current request; the engine never
/// retries internally. Error codes feed the API response envelope.
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    // === Request shape ===
    #[error("Validation failed: {field} {reason}")]
    Validation {
        /// Offending request field
        field: &'static str,
        /// Machine-readable reason tag
        reason: &'static str,
    },

    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    // === Business outcomes ===
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Insufficient funds")]
    InsufficientFunds,

    // === Infrastructure ===
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Balance mutation committed but the transaction record was not
    /// persisted. Must be alerted on, never swallowed.
    #[error("Recording failed: {0}")]
    RecordingFailed(String),
}

impl LedgerError {
    /// Build a validation error for one field
    pub fn validation(field: &'static str, reason: &'static str) -> Self {
        LedgerError::Validation { field, reason }
    }

    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::Validation { .. } => "VALIDATION_ERROR",
            LedgerError::InvalidTransactionType(_) => "INVALID_TRANSACTION_TYPE",
            LedgerError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            LedgerError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            LedgerError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            LedgerError::RecordingFailed(_) => "RECORDING_FAILED",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            LedgerError::Validation { .. } | LedgerError::InvalidTransactionType(_) => 400,
            LedgerError::AccountNotFound(_) => 404,
            LedgerError::InsufficientFunds => 422,
            LedgerError::StoreUnavailable(_) => 503,
            LedgerError::RecordingFailed(_) => 500,
        }
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::StoreUnavailable(e.to_string())
    }
}
