//! Data models for users and their bank accounts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ledger::types::Account;

/// Registered user
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Profile update request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 50))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// User profile as returned by the API (no password hash)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

/// Account as returned by the API
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountApiData {
    pub account_id: String,
    #[schema(example = 10000001_i64)]
    pub account_number: i64,
    /// Current balance, serialized as a decimal string
    #[schema(example = "250.00")]
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountApiData {
    fn from(a: Account) -> Self {
        Self {
            account_id: a.account_id.to_string(),
            account_number: a.account_number,
            balance: a.balance,
            created_at: a.created_at,
        }
    }
}
