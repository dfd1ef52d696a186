//! # Web API
//!
//! Axum HTTP surface over the order store, laboratory registry, and label
//! catalog. Every route is tenant-scoped through the [`extract::TenantId`]
//! extractor; responses use plain JSON arrays and objects with no
//! pagination envelope.

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::routing::{delete, get, post};
use axum::Router;

pub use errors::{ApiError, ApiResult};
pub use extract::TenantId;
pub use state::AppState;

/// Build the application router with all routes mounted
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/prosthesis",
            get(handlers::prosthesis::list_orders).post(handlers::prosthesis::create_order),
        )
        .route(
            "/prosthesis/labels",
            get(handlers::labels::list_labels).post(handlers::labels::create_label),
        )
        .route(
            "/prosthesis/labels/restore-defaults",
            post(handlers::labels::restore_default_labels),
        )
        .route(
            "/prosthesis/labels/:id",
            delete(handlers::labels::delete_label),
        )
        .route(
            "/prosthesis/:id",
            axum::routing::patch(handlers::prosthesis::update_order)
                .delete(handlers::prosthesis::delete_order),
        )
        .route(
            "/laboratories",
            get(handlers::laboratories::list_laboratories)
                .post(handlers::laboratories::create_laboratory),
        )
        .route(
            "/laboratories/:id",
            axum::routing::patch(handlers::laboratories::update_laboratory)
                .delete(handlers::laboratories::delete_laboratory),
        )
        .with_state(state)
}
