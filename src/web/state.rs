//! # Web API Application State
//!
//! Shared state handed to every handler. The order store pool is all the
//! handlers need; server configuration stays at the binary entry point.

use sqlx::SqlitePool;

/// Shared application state for the web API
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
