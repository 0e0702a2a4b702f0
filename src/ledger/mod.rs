//! Ledger Core
//!
//! Moves money between accounts while guaranteeing that balances never go
//! negative, under concurrent requests, with atomicity across multi-account
//! operations.
//!
//! # Architecture
//!
//! A request flows validator -> engine -> recorder:
//! - **TransactionValidator** checks the request's shape against its
//!   declared kind and produces a typed [`types::LedgerOp`]
//! - **LedgerEngine** executes the matching balance mutation through the
//!   store primitives
//! - **TransactionRecorder** appends the immutable record once the
//!   mutation committed
//!
//! # Transfer execution
//!
//! ```text
//! PENDING -> SOURCE_DEBITED -> COMMITTED
//!      \            |
//!       `-----> ROLLED_BACK
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Non-negative balances**: every debit is a conditional store
//!    operation with a zero floor; there is no read-then-write window
//! 2. **Record iff applied**: a record is appended only after its
//!    mutation committed; the reverse gap is surfaced as RecordingFailed
//! 3. **Both-or-neither**: a transfer's two mutations live inside one
//!    store scope; abort or drop rolls the debit back

pub mod engine;
pub mod error;
pub mod recorder;
pub mod types;
pub mod validator;

// Re-exports for convenience
pub use engine::LedgerEngine;
pub use error::LedgerError;
pub use recorder::TransactionRecorder;
pub use types::{
    Account, AccountId, LedgerOp, Transaction, TransactionId, TransactionRequest, TransferPhase,
    TxKind,
};
pub use validator::TransactionValidator;
