//! CoreBank - Account Ledger Service
//!
//! This is the main entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────┐    ┌──────────┐
//! │ Gateway  │───▶│ Validator │───▶│  Engine  │───▶│ Recorder │
//! │ (axum)   │    │  (shape)  │    │ (mutate) │    │ (append) │
//! └──────────┘    └───────────┘    └──────────┘    └──────────┘
//!
//! Engine responsibilities:
//! - Conditional balance updates (floor at zero, no read-then-write)
//! - Transactional transfer scope (both legs or neither)
//! - Append-only history once a mutation commits
//! ```

use std::sync::Arc;

use corebank::config::AppConfig;
use corebank::gateway::state::AppState;
use corebank::ledger::LedgerEngine;
use corebank::store::PgStore;
use corebank::user_auth::UserAuthService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() {
    let env = get_env();
    let app_config = AppConfig::load(&env);
    let _log_guard = corebank::logging::init_logging(&app_config);

    tracing::info!("Starting CoreBank in {} mode", env);

    println!("=== CoreBank: Account Ledger Service ===");
    println!("Build: {}", env!("GIT_HASH"));

    // Step 1: Connect to Postgres and bootstrap the schema
    println!("\n[1] Connecting to Postgres...");
    let store = match PgStore::connect(&app_config.postgres_url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to connect to Postgres: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = store.init_schema().await {
        eprintln!("❌ Failed to initialize schema: {}", e);
        std::process::exit(1);
    }
    println!("✅ Postgres connected and schema initialized");
    let store = Arc::new(store);

    // Step 2: Wire the ledger core
    println!("\n[2] Initializing ledger engine...");
    let engine = Arc::new(LedgerEngine::new(
        store.clone(),
        store.clone(),
        app_config.ledger.max_transaction_amount,
    ));
    println!(
        "✅ Ledger engine ready (max amount per transaction: {})",
        app_config.ledger.max_transaction_amount
    );

    // Step 3: Auth service shares the same pool
    let user_auth = Arc::new(UserAuthService::new(
        store.pool().clone(),
        app_config.auth.jwt_secret.clone(),
        app_config.auth.token_ttl_hours,
    ));

    let state = Arc::new(AppState::new(engine, store, user_auth));

    // Step 4: Serve, allow --port override of the YAML value
    let gateway_config = &app_config.gateway;
    let port = get_port_override().unwrap_or(gateway_config.port);

    corebank::gateway::run_server(&gateway_config.host, port, state).await;
}
