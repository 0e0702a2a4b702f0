use std::sync::Arc;

use crate::ledger::LedgerEngine;
use crate::store::PgStore;
use crate::user_auth::UserAuthService;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// Ledger engine executing all money operations
    pub engine: Arc<LedgerEngine>,
    /// PostgreSQL store, also used for account and transaction queries
    pub store: Arc<PgStore>,
    /// JWT auth service
    pub user_auth: Arc<UserAuthService>,
}

impl AppState {
    pub fn new(
        engine: Arc<LedgerEngine>,
        store: Arc<PgStore>,
        user_auth: Arc<UserAuthService>,
    ) -> Self {
        Self {
            engine,
            store,
            user_auth,
        }
    }
}
