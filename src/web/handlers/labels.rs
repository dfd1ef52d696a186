//! # Label Catalog Handlers
//!
//! The label catalog is persisted per tenant. Creating a label derives
//! its id from the name; a collision with an existing id is a 409.
//! Deleting a label strips it from every order, and restore-defaults
//! resets the catalog to exactly the six built-ins, dropping customs
//! with the same cascade strip.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::models::label::slugify;
use crate::models::{Label, NewLabel};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::extract::TenantId;
use crate::web::state::AppState;

/// List the tenant's labels: GET /prosthesis/labels
pub async fn list_labels(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
) -> ApiResult<Json<Vec<Label>>> {
    let labels = Label::list_for_company(&state.pool, company_id).await?;
    Ok(Json(labels))
}

/// Create a label: POST /prosthesis/labels
pub async fn create_label(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Json(new_label): Json<NewLabel>,
) -> ApiResult<(StatusCode, Json<Label>)> {
    if new_label.name.trim().is_empty() {
        return Err(ApiError::bad_request("Label name must not be empty"));
    }

    let id = slugify(&new_label.name);
    if Label::find_by_id(&state.pool, company_id, &id).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "A label with id '{id}' already exists"
        )));
    }

    let label = Label::create(&state.pool, company_id, new_label).await?;
    info!(label_id = %label.id, company_id = company_id, "Created label");

    Ok((StatusCode::CREATED, Json(label)))
}

/// Delete a label and strip it from orders: DELETE /prosthesis/labels/{id}
pub async fn delete_label(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = Label::delete(&state.pool, company_id, &id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Re-seed the default labels: POST /prosthesis/labels/restore-defaults
pub async fn restore_default_labels(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
) -> ApiResult<Json<Vec<Label>>> {
    let labels = Label::restore_defaults(&state.pool, company_id).await?;
    info!(company_id = company_id, "Restored default labels");

    Ok(Json(labels))
}
