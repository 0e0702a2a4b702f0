//! CoreBank - Account Ledger Service
//!
//! A small banking core: user accounts, non-negative balances, and an
//! append-only transaction history behind an HTTP API.
//!
//! # Modules
//!
//! - [`ledger`] - Validator, engine, and recorder for balance mutations
//! - [`store`] - Storage traits plus in-memory and Postgres backends
//! - [`account`] - User profiles and account lifecycle
//! - [`user_auth`] - Registration, login, and JWT middleware
//! - [`gateway`] - Axum HTTP API with OpenAPI docs
//! - [`config`] - Per-environment YAML configuration
//! - [`logging`] - Rolling file + stdout tracing setup

// Ledger core - must be first!
pub mod ledger;

// Storage backends
pub mod store;

// Users, accounts, auth
pub mod account;
pub mod user_auth;

// HTTP API
pub mod gateway;

// Runtime plumbing
pub mod config;
pub mod logging;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use ledger::{
    Account, AccountId, LedgerEngine, LedgerError, LedgerOp, Transaction, TransactionId,
    TransactionRecorder, TransactionRequest, TransactionValidator, TxKind,
};
pub use store::{AccountStore, BalanceUpdate, MemoryStore, PgStore, TransactionStore, TransferScope};

// Service re-exports
pub use account::{AccountRepository, UserRepository};
pub use user_auth::UserAuthService;
