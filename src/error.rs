//! # Structured Error Handling
//!
//! Top-level error surface for startup and configuration paths.
//! Component-specific errors (state machine, web API, client controller)
//! live next to their modules and are handled at those boundaries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProsthesisError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, ProsthesisError>;
