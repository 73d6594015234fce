use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use distcalc_core::{ExpressionId, ExpressionView};

use crate::state::AppState;

use super::dispatch_error;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpressionsResponse {
    pub expressions: Vec<ExpressionView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpressionResponse {
    pub expression: ExpressionView,
}

/// List every submitted expression in submission order.
#[utoipa::path(
    get,
    path = "/api/v1/expressions",
    tag = "Expressions",
    responses(
        (status = 200, description = "All expressions", body = ExpressionsResponse)
    )
)]
pub async fn list_expressions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpressionsResponse>, (StatusCode, String)> {
    let expressions = state.dispatcher.expressions().map_err(dispatch_error)?;
    Ok(Json(ExpressionsResponse { expressions }))
}

/// Fetch one expression's status and result.
#[utoipa::path(
    get,
    path = "/api/v1/expressions/{id}",
    tag = "Expressions",
    params(
        ("id" = String, Path, description = "Expression ID")
    ),
    responses(
        (status = 200, description = "Expression state", body = ExpressionResponse),
        (status = 404, description = "Expression not found", body = String)
    )
)]
pub async fn get_expression(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ExpressionResponse>, (StatusCode, String)> {
    // A malformed id can't name a stored expression.
    let id: ExpressionId = id.parse().map_err(|_| {
        (StatusCode::NOT_FOUND, format!("Expression not found: {}", id))
    })?;
    let expression = state.dispatcher.expression(id).map_err(dispatch_error)?;
    Ok(Json(ExpressionResponse { expression }))
}
