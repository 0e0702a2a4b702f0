//! HTTP Gateway
//!
//! Axum server exposing the ledger over a JSON API. All money routes
//! sit behind JWT auth; the handlers fix the transaction kind and the
//! source account before anything reaches the ledger engine.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) {
    // ==========================================================================
    // Auth Routes (public)
    // ==========================================================================
    let auth_routes = Router::new()
        .route("/register", post(crate::user_auth::handlers::register))
        .route("/login", post(crate::user_auth::handlers::login))
        .route("/logout", post(crate::user_auth::handlers::logout));

    // ==========================================================================
    // User Routes - Protected by JWT
    // ==========================================================================
    let user_routes = Router::new()
        .route("/", get(handlers::get_user))
        .route("/", put(handlers::update_user))
        .layer(from_fn_with_state(
            state.clone(),
            crate::user_auth::middleware::jwt_auth_middleware,
        ));

    // ==========================================================================
    // Account + Transaction Routes - Protected by JWT
    // ==========================================================================
    let account_routes = Router::new()
        .route("/", get(handlers::list_accounts))
        .route("/", post(handlers::create_account))
        .route("/{number}", get(handlers::get_account))
        .route("/{number}", delete(handlers::delete_account))
        .route(
            "/{number}/transactions",
            get(handlers::get_account_transactions),
        )
        .route("/{number}/deposit", post(handlers::deposit))
        .route("/{number}/withdraw", post(handlers::withdraw))
        .route("/{number}/transfer", post(handlers::transfer))
        .layer(from_fn_with_state(
            state.clone(),
            crate::user_auth::middleware::jwt_auth_middleware,
        ));

    let transaction_routes = Router::new()
        .route("/", get(handlers::get_transactions))
        .route("/{id}", get(handlers::get_transaction_by_id))
        .layer(from_fn_with_state(
            state.clone(),
            crate::user_auth::middleware::jwt_auth_middleware,
        ));

    // Build complete router
    let app = Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/user", user_routes)
        .nest("/api/v1/accounts", account_routes)
        .nest("/api/v1/transactions", transaction_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    // Bind address
    let addr = format!("{}:{}", host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                port, port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);

    // Start server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
