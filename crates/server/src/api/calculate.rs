use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

use super::{dispatch_error, parse_body};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculateRequest {
    /// Infix arithmetic over `+ - * /` and parentheses, e.g. `2 + 3 * 4`.
    pub expression: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CalculateResponse {
    pub id: String,
}

/// Submit an expression for distributed evaluation.
#[utoipa::path(
    post,
    path = "/api/v1/calculate",
    tag = "Expressions",
    request_body = CalculateRequest,
    responses(
        (status = 201, description = "Expression accepted", body = CalculateResponse),
        (status = 422, description = "Malformed body or invalid expression", body = String)
    )
)]
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CalculateResponse>), (StatusCode, String)> {
    let request: CalculateRequest = parse_body(&body)?;
    let id = state
        .dispatcher
        .submit(&request.expression)
        .map_err(dispatch_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CalculateResponse { id: id.to_string() }),
    ))
}
