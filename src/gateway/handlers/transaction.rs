//! Transaction handlers: money operations and history queries
//!
//! Money endpoints build a [`TransactionRequest`] with the kind and the
//! path account fixed server side, then hand it to the ledger engine.
//! Clients never choose the transaction kind or the source account.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{
    ApiResponse, MoneyRequest, TransferApiRequest, error_codes, ledger_error_response,
};
use super::helpers::{Rejection, authorized_account, user_id_from_claims};
use crate::account::repository::AccountRepository;
use crate::ledger::types::{Transaction, TransactionId, TransactionRequest};
use crate::user_auth::Claims;

/// Transaction record as returned by the API
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct TransactionApiData {
    #[schema(example = "01JDFG2PZV8YT2N0S6EXAMPLE")]
    pub transaction_id: String,
    /// Transaction kind: Deposit, Payout or Transfer
    #[serde(rename = "type")]
    #[schema(example = "Deposit")]
    pub kind: String,
    #[schema(example = "100.50")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionApiData {
    fn from(tx: Transaction) -> Self {
        Self {
            transaction_id: tx.transaction_id.to_string(),
            kind: tx.kind.as_str().to_string(),
            amount: tx.amount,
            from_account: tx.source.map(|a| a.to_string()),
            to_account: tx.destination.map(|a| a.to_string()),
            created_at: tx.created_at,
        }
    }
}

/// Deposit into one of the caller's accounts
///
/// POST /api/v1/accounts/{number}/deposit
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{number}/deposit",
    params(
        ("number" = i64, Path, description = "Account number")
    ),
    request_body = MoneyRequest,
    responses(
        (status = 201, description = "Deposit applied", body = ApiResponse<TransactionApiData>),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(number): Path<i64>,
    Json(req): Json<MoneyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionApiData>>), Rejection> {
    let account = authorized_account(&state, &claims, number).await?;

    let request = TransactionRequest::deposit(account.account_id, req.amount);
    let tx = state
        .engine
        .execute(&request)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TransactionApiData::from(tx))),
    ))
}

/// Withdraw from one of the caller's accounts
///
/// POST /api/v1/accounts/{number}/withdraw
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{number}/withdraw",
    params(
        ("number" = i64, Path, description = "Account number")
    ),
    request_body = MoneyRequest,
    responses(
        (status = 201, description = "Payout applied", body = ApiResponse<TransactionApiData>),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Insufficient funds")
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(number): Path<i64>,
    Json(req): Json<MoneyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionApiData>>), Rejection> {
    let account = authorized_account(&state, &claims, number).await?;

    let request = TransactionRequest::payout(account.account_id, req.amount);
    let tx = state
        .engine
        .execute(&request)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TransactionApiData::from(tx))),
    ))
}

/// Transfer from one of the caller's accounts to another account
///
/// POST /api/v1/accounts/{number}/transfer
///
/// The destination is addressed by its public account number and may
/// belong to any user.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{number}/transfer",
    params(
        ("number" = i64, Path, description = "Source account number")
    ),
    request_body = TransferApiRequest,
    responses(
        (status = 201, description = "Transfer applied", body = ApiResponse<TransactionApiData>),
        (status = 400, description = "Invalid amount or destination"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found"),
        (status = 422, description = "Insufficient funds")
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(number): Path<i64>,
    Json(req): Json<TransferApiRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionApiData>>), Rejection> {
    let account = authorized_account(&state, &claims, number).await?;

    // Resolve the destination number before the ledger sees the request
    let destination = AccountRepository::find_by_number(state.store.pool(), req.to_account)
        .await
        .map_err(|e| ledger_error_response(&e))?
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                "Destination account not found",
            )),
        ))?;

    let request =
        TransactionRequest::transfer(account.account_id, destination.account_id, req.amount);
    let tx = state
        .engine
        .execute(&request)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TransactionApiData::from(tx))),
    ))
}

/// All transactions touching the caller's accounts, newest first
///
/// GET /api/v1/transactions
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    responses(
        (status = 200, description = "Transaction history", body = ApiResponse<Vec<TransactionApiData>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<TransactionApiData>>>), Rejection> {
    let user_id = user_id_from_claims(&claims)?;

    let accounts = AccountRepository::list_for_user(state.store.pool(), user_id)
        .await
        .map_err(|e| ledger_error_response(&e))?;
    let ids: Vec<_> = accounts.iter().map(|a| a.account_id).collect();

    let transactions = state
        .store
        .transactions_for_accounts(&ids)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    let data: Vec<TransactionApiData> = transactions
        .into_iter()
        .map(TransactionApiData::from)
        .collect();
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// Fetch a single transaction by ID
///
/// GET /api/v1/transactions/{id}
///
/// Only visible when it touches one of the caller's accounts; anything
/// else reads as not-found.
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    params(
        ("id" = String, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction details", body = ApiResponse<TransactionApiData>),
        (status = 400, description = "Malformed transaction ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Transaction not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn get_transaction_by_id(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionApiData>>), Rejection> {
    let user_id = user_id_from_claims(&claims)?;

    let transaction_id: TransactionId = id.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                "Malformed transaction ID",
            )),
        )
    })?;

    fn not_found() -> Rejection {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::TRANSACTION_NOT_FOUND,
                "Transaction not found",
            )),
        )
    }

    let tx = state
        .store
        .get_transaction(transaction_id)
        .await
        .map_err(|e| ledger_error_response(&e))?
        .ok_or_else(not_found)?;

    // Visibility check against the caller's accounts
    let accounts = AccountRepository::list_for_user(state.store.pool(), user_id)
        .await
        .map_err(|e| ledger_error_response(&e))?;
    let touches_caller = accounts
        .iter()
        .any(|a| tx.source == Some(a.account_id) || tx.destination == Some(a.account_id));

    if !touches_caller {
        return Err(not_found());
    }

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(TransactionApiData::from(tx))),
    ))
}

/// Transactions touching one of the caller's accounts, newest first
///
/// GET /api/v1/accounts/{number}/transactions
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{number}/transactions",
    params(
        ("number" = i64, Path, description = "Account number")
    ),
    responses(
        (status = 200, description = "Per-account history", body = ApiResponse<Vec<TransactionApiData>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn get_account_transactions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(number): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<TransactionApiData>>>), Rejection> {
    let account = authorized_account(&state, &claims, number).await?;

    let transactions = state
        .store
        .transactions_for_account(account.account_id)
        .await
        .map_err(|e| ledger_error_response(&e))?;

    let data: Vec<TransactionApiData> = transactions
        .into_iter()
        .map(TransactionApiData::from)
        .collect();
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}
