//! OpenAPI / Swagger UI Documentation
//!
//! This module provides auto-generated OpenAPI 3.0 documentation for the CoreBank API.
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

// Import handler types for schema registration
use crate::account::models::{AccountApiData, UpdateUserRequest, UserProfile};
use crate::gateway::handlers::{HealthResponse, TransactionApiData};
use crate::gateway::types::{MoneyRequest, TransferApiRequest};
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};

/// JWT bearer authentication security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "JWT issued by /api/v1/auth/login. \
                             Send as: Authorization: Bearer <token>",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CoreBank API",
        version = "1.0.0",
        description = "Banking backend with a strict double-entry style ledger: deposits, payouts and atomic transfers over non-negative account balances.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        // Auth
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::logout,
        // User
        crate::gateway::handlers::user::get_user,
        crate::gateway::handlers::user::update_user,
        // Accounts
        crate::gateway::handlers::account::list_accounts,
        crate::gateway::handlers::account::create_account,
        crate::gateway::handlers::account::get_account,
        crate::gateway::handlers::account::delete_account,
        // Transactions
        crate::gateway::handlers::transaction::deposit,
        crate::gateway::handlers::transaction::withdraw,
        crate::gateway::handlers::transaction::transfer,
        crate::gateway::handlers::transaction::get_transactions,
        crate::gateway::handlers::transaction::get_transaction_by_id,
        crate::gateway::handlers::transaction::get_account_transactions,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserProfile,
            UpdateUserRequest,
            AccountApiData,
            MoneyRequest,
            TransferApiRequest,
            TransactionApiData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and JWT session endpoints"),
        (name = "User", description = "Profile management (auth required)"),
        (name = "Accounts", description = "Bank account lifecycle (auth required)"),
        (name = "Transactions", description = "Money operations and history (auth required)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
