//! # Laboratory Registry Handlers
//!
//! Standard tenant-scoped CRUD over the laboratory registry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::models::{Laboratory, LaboratoryUpdate, NewLaboratory};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::extract::TenantId;
use crate::web::state::AppState;

/// List the tenant's laboratories: GET /laboratories
pub async fn list_laboratories(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
) -> ApiResult<Json<Vec<Laboratory>>> {
    let labs = Laboratory::list_for_company(&state.pool, company_id).await?;
    Ok(Json(labs))
}

/// Register a laboratory: POST /laboratories
pub async fn create_laboratory(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Json(new_lab): Json<NewLaboratory>,
) -> ApiResult<(StatusCode, Json<Laboratory>)> {
    if new_lab.name.trim().is_empty() {
        return Err(ApiError::bad_request("Laboratory name must not be empty"));
    }

    let lab = Laboratory::create(&state.pool, company_id, new_lab).await?;
    info!(laboratory_id = lab.id, company_id = company_id, name = %lab.name, "Registered laboratory");

    Ok((StatusCode::CREATED, Json(lab)))
}

/// Update a laboratory: PATCH /laboratories/{id}
pub async fn update_laboratory(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Path(id): Path<i64>,
    Json(update): Json<LaboratoryUpdate>,
) -> ApiResult<Json<Laboratory>> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(ApiError::bad_request("Laboratory name must not be empty"));
        }
    }

    let lab = Laboratory::update(&state.pool, company_id, id, update)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(lab))
}

/// Remove a laboratory: DELETE /laboratories/{id}
pub async fn delete_laboratory(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = Laboratory::delete(&state.pool, company_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!(laboratory_id = id, company_id = company_id, "Removed laboratory");
    Ok(StatusCode::NO_CONTENT)
}
