//! # Prosthesis Order Handlers
//!
//! HTTP handlers for order listing, creation, partial update, and
//! deletion. Status changes arrive as PATCH bodies and are validated
//! against the transition table before any row is touched; the lifecycle
//! date effects of a valid transition are applied here so callers cannot
//! produce a `sent` order without a sent date.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use tracing::{info, warn};

use crate::logging::log_order_operation;
use crate::models::{Laboratory, NewProsthesisOrder, ProsthesisOrder, ProsthesisOrderUpdate};
use crate::state_machine::{plan_transition, DateEffect};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::extract::TenantId;
use crate::web::state::AppState;

/// List the tenant's orders: GET /prosthesis
pub async fn list_orders(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
) -> ApiResult<Json<Vec<ProsthesisOrder>>> {
    let orders = ProsthesisOrder::list_for_company(&state.pool, company_id).await?;
    Ok(Json(orders))
}

/// Create an order: POST /prosthesis
///
/// Whatever status the body carries, the stored order is `pending`. A
/// laboratory name is resolved against the registry first, creating the
/// entry when it is new.
pub async fn create_order(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Json(new_order): Json<NewProsthesisOrder>,
) -> ApiResult<(StatusCode, Json<ProsthesisOrder>)> {
    if new_order.description.trim().is_empty() {
        return Err(ApiError::bad_request("Description must not be empty"));
    }
    if new_order.prosthesis_type.trim().is_empty() {
        return Err(ApiError::bad_request("Prosthesis type must not be empty"));
    }

    let mut new_order = new_order;
    if let Some(name) = &new_order.laboratory {
        if name.trim().is_empty() {
            new_order.laboratory = None;
        } else {
            let lab = Laboratory::resolve_or_create(&state.pool, company_id, name).await?;
            new_order.laboratory = Some(lab.name);
        }
    }

    let order = ProsthesisOrder::create(&state.pool, company_id, new_order).await?;

    log_order_operation(
        "create",
        Some(order.id),
        Some(company_id),
        &order.status.to_string(),
        Some(&format!("type={}", order.prosthesis_type)),
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// Partially update an order: PATCH /prosthesis/{id}
///
/// Used for both edits and transitions. A status change must be legal per
/// the transition table; its date effect overrides any date fields the
/// body did not set explicitly.
pub async fn update_order(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Path(id): Path<i64>,
    Json(update): Json<ProsthesisOrderUpdate>,
) -> ApiResult<Json<ProsthesisOrder>> {
    let Some(current) = ProsthesisOrder::find_by_id(&state.pool, company_id, id).await? else {
        warn!(order_id = id, company_id = company_id, "Order not found for update");
        return Err(ApiError::NotFound);
    };

    let mut update = update;

    if let Some(target) = update.status {
        if target != current.status {
            let effect = plan_transition(current.status, target)?;
            apply_date_effect(&mut update, effect);

            log_order_operation(
                "transition",
                Some(id),
                Some(company_id),
                &target.to_string(),
                Some(&format!("from={}", current.status)),
            );
        }
    }

    if let Some(name) = &update.laboratory {
        if !name.trim().is_empty() {
            let lab = Laboratory::resolve_or_create(&state.pool, company_id, name).await?;
            update.laboratory = Some(lab.name);
        }
    }

    let order = ProsthesisOrder::update(&state.pool, company_id, id, update)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(order))
}

/// Delete an order: DELETE /prosthesis/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    TenantId(company_id): TenantId,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = ProsthesisOrder::delete(&state.pool, company_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!(order_id = id, company_id = company_id, "Deleted order");
    Ok(StatusCode::NO_CONTENT)
}

/// Fill in the lifecycle dates a transition implies, without clobbering
/// dates the caller set explicitly in the same request.
fn apply_date_effect(update: &mut ProsthesisOrderUpdate, effect: DateEffect) {
    let today = Local::now().date_naive();
    match effect {
        DateEffect::StatusOnly => {}
        DateEffect::MarkSent => {
            if update.sent_date.is_none() {
                update.sent_date = Some(Some(today));
            }
            update.return_date = Some(None);
        }
        DateEffect::MarkReturned => {
            if update.return_date.is_none() {
                update.return_date = Some(Some(today));
            }
        }
        DateEffect::ClearShipment => {
            update.sent_date = Some(None);
            update.return_date = Some(None);
        }
    }
}
