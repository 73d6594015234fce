use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use distcalc_compute::DispatchMetrics;

use crate::state::AppState;

use super::dispatch_error;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub metrics: DispatchMetrics,
}

/// Liveness plus dispatcher counters.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse),
        (status = 500, description = "Task store unavailable", body = String)
    )
)]
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, (StatusCode, String)> {
    let metrics = state.dispatcher.metrics().map_err(dispatch_error)?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics,
    }))
}
