//! # Tenant Extraction
//!
//! Tenant identity arrives on every request as the `x-company-id` header,
//! set by the authentication layer in front of this service. Requests
//! without a parseable tenant id are rejected with 401 before any handler
//! logic runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::web::errors::ApiError;

pub const COMPANY_ID_HEADER: &str = "x-company-id";

/// The tenant owning the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let company_id = parts
            .headers
            .get(COMPANY_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .ok_or(ApiError::Unauthorized)?;

        Ok(TenantId(company_id))
    }
}
