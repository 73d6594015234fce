use serde::{Deserialize, Serialize};

use crate::ids::ExpressionId;

/// Evaluation state of a submitted expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionStatus {
    Pending,
    Completed,
}

/// A submitted arithmetic formula and its aggregate result.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub id: ExpressionId,
    pub source: String,
    pub status: ExpressionStatus,
    /// Meaningful only once `status` is `Completed`.
    pub result: f64,
}

impl Expression {
    pub fn new(id: ExpressionId, source: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            status: ExpressionStatus::Pending,
            result: 0.0,
        }
    }

    pub fn finish(&mut self, result: f64) {
        self.result = result;
        self.status = ExpressionStatus::Completed;
    }

    pub fn is_completed(&self) -> bool {
        self.status == ExpressionStatus::Completed
    }

    pub fn view(&self) -> ExpressionView {
        ExpressionView {
            id: self.id,
            status: self.status,
            result: self.result,
        }
    }
}

/// Public projection of an [`Expression`] as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExpressionView {
    #[schema(value_type = String)]
    pub id: ExpressionId,
    pub status: ExpressionStatus,
    #[serde(with = "crate::number")]
    #[schema(value_type = f64)]
    pub result: f64,
}
