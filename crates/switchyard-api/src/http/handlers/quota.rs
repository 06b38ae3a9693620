//! Quota and recommendation endpoints.
//!
//! GET /api/v1/quota             - Per-provider usage and availability
//! GET /api/v1/recommend/{class} - First admissible provider for a class

use std::collections::BTreeMap;
use std::time::Instant;

use axum::extract::{Path, State};
use serde::Serialize;

use switchyard_types::provider::RequestClass;
use switchyard_types::routing::ProviderQuotaStatus;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/quota
pub async fn get_quota(
    State(state): State<AppState>,
) -> ApiResponse<BTreeMap<String, ProviderQuotaStatus>> {
    let started = Instant::now();
    ApiResponse::success(state.router.quota_status(), started)
}

#[derive(Debug, Serialize)]
pub struct Recommendation {
    pub class: RequestClass,
    /// `null` when no provider is currently admissible.
    pub provider: Option<String>,
}

/// GET /api/v1/recommend/{class}
pub async fn get_recommendation(
    State(state): State<AppState>,
    Path(class): Path<String>,
) -> Result<ApiResponse<Recommendation>, AppError> {
    let started = Instant::now();
    let class: RequestClass = class.parse().map_err(AppError::Validation)?;

    let provider = state.router.recommended_provider(class);
    Ok(ApiResponse::success(Recommendation { class, provider }, started))
}
