//! User profile handlers

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};
use super::helpers::{Rejection, db_error, user_id_from_claims};
use crate::account::models::{UpdateUserRequest, UserProfile};
use crate::account::repository::UserRepository;
use crate::user_auth::Claims;

/// Get the authenticated user's profile
///
/// GET /api/v1/user
#[utoipa::path(
    get,
    path = "/api/v1/user",
    responses(
        (status = 200, description = "User profile", body = ApiResponse<UserProfile>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), Rejection> {
    let user_id = user_id_from_claims(&claims)?;

    let user = UserRepository::get_by_id(state.store.pool(), user_id)
        .await
        .map_err(db_error)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                "User not found",
            )),
        ))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(UserProfile::from(user))),
    ))
}

/// Update the authenticated user's profile
///
/// PUT /api/v1/user
#[utoipa::path(
    put,
    path = "/api/v1/user",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<UserProfile>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), Rejection> {
    let user_id = user_id_from_claims(&claims)?;

    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                e.to_string(),
            )),
        ));
    }

    let updated = UserRepository::update_profile(
        state.store.pool(),
        user_id,
        req.first_name.as_deref(),
        req.last_name.as_deref(),
        req.email.as_deref(),
    )
    .await
    .map_err(|e| {
        if e.to_string().contains("duplicate key") {
            (
                StatusCode::CONFLICT,
                Json(ApiResponse::<()>::error(
                    error_codes::INVALID_PARAMETER,
                    "Email already in use",
                )),
            )
        } else {
            db_error(e)
        }
    })?;

    if !updated {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                "User not found",
            )),
        ));
    }

    let user = UserRepository::get_by_id(state.store.pool(), user_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| db_error("user vanished after update"))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(UserProfile::from(user))),
    ))
}
