//! Handler helper functions
//!
//! This module contains shared utilities used by multiple handlers.

use axum::{Json, http::StatusCode};

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};
use crate::account::repository::AccountRepository;
use crate::ledger::types::Account;
use crate::user_auth::Claims;

pub type Rejection = (StatusCode, Json<ApiResponse<()>>);

/// Extract the user ID from verified JWT claims
pub fn user_id_from_claims(claims: &Claims) -> Result<i64, Rejection> {
    claims.sub.parse::<i64>().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error(
                error_codes::AUTH_FAILED,
                "Invalid user ID in token",
            )),
        )
    })
}

/// Resolve an account number to an account owned by the caller.
///
/// A foreign account reads as not-found, so the response never reveals
/// whether the number is in use.
pub async fn authorized_account(
    state: &AppState,
    claims: &Claims,
    account_number: i64,
) -> Result<Account, Rejection> {
    let user_id = user_id_from_claims(claims)?;

    let account = AccountRepository::find_by_number(state.store.pool(), account_number)
        .await
        .map_err(|e| super::super::types::ledger_error_response(&e))?;

    match account {
        Some(a) if a.user_id == user_id => Ok(a),
        _ => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::ACCOUNT_NOT_FOUND,
                "Account not found",
            )),
        )),
    }
}

/// Internal error rejection for database faults outside the ledger path
pub fn db_error(e: impl std::fmt::Display) -> Rejection {
    tracing::error!("Database query failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error(
            error_codes::INTERNAL_ERROR,
            "Database query failed",
        )),
    )
}
