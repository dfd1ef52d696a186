//! # Configuration
//!
//! Environment-driven runtime configuration with sensible defaults for
//! local development.

use crate::error::{ProsthesisError, Result};

/// Runtime configuration for both the server surface and the workflow client.
#[derive(Debug, Clone)]
pub struct ProsthesisConfig {
    /// SQLite connection string for the order store
    pub database_url: String,
    /// Address the HTTP surface binds to
    pub bind_address: String,
    /// Base URL the workflow client talks to
    pub api_base_url: String,
    /// Per-request timeout for client calls, in milliseconds
    pub request_timeout_ms: u64,
    /// Bounded retry budget for transient mutation failures
    pub max_retries: u32,
    /// Fixed delay between retry attempts, in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for ProsthesisConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://prosthesis.db?mode=rwc".to_string(),
            bind_address: "127.0.0.1:8080".to_string(),
            api_base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_ms: 30_000,
            max_retries: 3,
            retry_delay_ms: 1_000,
        }
    }
}

impl ProsthesisConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(bind) = std::env::var("PROSTHESIS_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(base_url) = std::env::var("PROSTHESIS_API_BASE_URL") {
            config.api_base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("PROSTHESIS_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = timeout.parse().map_err(|e| {
                ProsthesisError::Configuration(format!("Invalid request_timeout_ms: {e}"))
            })?;
        }

        if let Ok(retries) = std::env::var("PROSTHESIS_MAX_RETRIES") {
            config.max_retries = retries
                .parse()
                .map_err(|e| ProsthesisError::Configuration(format!("Invalid max_retries: {e}")))?;
        }

        if let Ok(delay) = std::env::var("PROSTHESIS_RETRY_DELAY_MS") {
            config.retry_delay_ms = delay.parse().map_err(|e| {
                ProsthesisError::Configuration(format!("Invalid retry_delay_ms: {e}"))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProsthesisConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 1_000);
        assert!(config.database_url.starts_with("sqlite://"));
    }
}
