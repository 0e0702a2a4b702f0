//! Bank account handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes, ledger_error_response};
use super::helpers::{Rejection, authorized_account, user_id_from_claims};
use crate::account::models::AccountApiData;
use crate::account::repository::AccountRepository;
use crate::user_auth::Claims;

/// List the caller's accounts
///
/// GET /api/v1/accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "Accounts owned by the caller", body = ApiResponse<Vec<AccountApiData>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<AccountApiData>>>), Rejection> {
    let user_id = user_id_from_claims(&claims)?;

    let accounts = AccountRepository::list_for_user(state.store.pool(), user_id)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    let data: Vec<AccountApiData> = accounts.into_iter().map(AccountApiData::from).collect();
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// Open a new account for the caller
///
/// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AccountApiData>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<ApiResponse<AccountApiData>>), Rejection> {
    let user_id = user_id_from_claims(&claims)?;

    let account = AccountRepository::create(state.store.pool(), user_id)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    tracing::info!(
        user_id,
        account_number = account.account_number,
        "account opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AccountApiData::from(account))),
    ))
}

/// Fetch one of the caller's accounts by number
///
/// GET /api/v1/accounts/{number}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{number}",
    params(
        ("number" = i64, Path, description = "Account number")
    ),
    responses(
        (status = 200, description = "Account details", body = ApiResponse<AccountApiData>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(number): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<AccountApiData>>), Rejection> {
    let account = authorized_account(&state, &claims, number).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(AccountApiData::from(account))),
    ))
}

/// Close one of the caller's accounts
///
/// DELETE /api/v1/accounts/{number}
///
/// Only an account holding a zero balance can be closed; the guard and
/// the delete are one conditional statement, so a concurrent deposit
/// cannot strand money in a closed account.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{number}",
    params(
        ("number" = i64, Path, description = "Account number")
    ),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Account still holds funds")
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(number): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), Rejection> {
    let account = authorized_account(&state, &claims, number).await?;

    let deleted = AccountRepository::delete_if_zero_balance(state.store.pool(), account.account_id)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    if !deleted {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::<()>::error(
                error_codes::ACCOUNT_NOT_EMPTY,
                "Account balance must be zero before deletion",
            )),
        ));
    }

    tracing::info!(account_number = number, "account closed");
    Ok((StatusCode::OK, Json(ApiResponse::success(()))))
}
