//! HTTP endpoint modules.
//!
//! Public API under `/api/v1`, the worker protocol under `/internal`.
//! Shared error mapping lives here.

mod calculate;
pub mod doc;
mod expressions;
mod health;
mod internal;

use axum::http::StatusCode;
use tracing::error;

use distcalc_compute::DispatchError;

pub use calculate::{calculate, CalculateRequest, CalculateResponse};
pub use expressions::{get_expression, list_expressions, ExpressionResponse, ExpressionsResponse};
pub use health::{health, HealthResponse};
pub use internal::{get_task, post_task_result};

// ── Error mapping ────────────────────────────────────────────────

/// Map a dispatcher failure to a status code and plain-text message.
pub(crate) fn dispatch_error(e: DispatchError) -> (StatusCode, String) {
    let status = match &e {
        DispatchError::EmptyExpression | DispatchError::Compile(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DispatchError::TaskNotFound(_) | DispatchError::ExpressionNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DispatchError::LockPoisoned(_) => {
            error!(error = %e, "Task store unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

/// Parse a JSON request body; anything malformed is a 422.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, (StatusCode, String)> {
    serde_json::from_slice(body)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, format!("Invalid JSON: {}", e)))
}
