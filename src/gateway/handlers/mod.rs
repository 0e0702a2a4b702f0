//! HTTP request handlers

pub mod account;
pub mod health;
pub mod helpers;
pub mod transaction;
pub mod user;

// Re-export handler functions for router construction
pub use account::{create_account, delete_account, get_account, list_accounts};
pub use health::{HealthResponse, health_check};
pub use transaction::{
    TransactionApiData, deposit, get_account_transactions, get_transaction_by_id,
    get_transactions, transfer, withdraw,
};
pub use user::{get_user, update_user};
