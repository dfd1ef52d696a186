//! # Prosthesis Server
//!
//! Binary entry point: loads configuration from the environment, opens
//! the database, runs migrations, and serves the HTTP API.

use prosthesis_core::config::ProsthesisConfig;
use prosthesis_core::logging::init_structured_logging;
use prosthesis_core::web::{build_router, AppState};
use prosthesis_core::{database, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_structured_logging();

    let config = ProsthesisConfig::from_env()?;
    info!(
        database_url = %config.database_url,
        bind_address = %config.bind_address,
        "Starting prosthesis server"
    );

    let pool = database::connect(&config.database_url).await?;
    database::run_migrations(&pool).await?;

    let app = build_router(AppState::new(pool));
    let bind_address = config.bind_address;

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| {
            prosthesis_core::ProsthesisError::Configuration(format!(
                "Failed to bind {bind_address}: {e}"
            ))
        })?;

    info!(bind_address = %bind_address, "Listening");
    axum::serve(listener, app).await.map_err(|e| {
        prosthesis_core::ProsthesisError::Configuration(format!("Server error: {e}"))
    })?;

    Ok(())
}
