//! # Workflow Client
//!
//! The consuming side of the HTTP surface: a typed API client with
//! bounded retry, and the board controller that keeps an optimistic local
//! view of the canonical order list while mutations are in flight.

pub mod api_client;
pub mod controller;

pub use api_client::{ApiClientConfig, ProsthesisApiClient};
pub use controller::{ControllerError, WorkflowController};

use thiserror::Error;

/// Errors surfaced by the API client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Client configuration error: {0}")]
    Configuration(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Resource not found")]
    NotFound,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Request failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

pub type ClientResult<T> = Result<T, ClientError>;
