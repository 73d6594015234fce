//! JSON bodies exchanged between the orchestrator and its workers.

use serde::{Deserialize, Serialize};

use crate::ids::TaskId;
use crate::task::Task;

/// A ready task handed to a polling worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TaskAssignment {
    #[schema(value_type = String)]
    pub id: TaskId,
    #[serde(with = "crate::number")]
    #[schema(value_type = f64)]
    pub arg1: f64,
    #[serde(with = "crate::number")]
    #[schema(value_type = f64)]
    pub arg2: f64,
    /// Operator symbol: one of `+ - * /`.
    pub operation: String,
    /// Milliseconds the worker should spend "computing".
    pub operation_time: u64,
}

impl From<&Task> for TaskAssignment {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            arg1: task.operand_a.value(),
            arg2: task.operand_b.value(),
            operation: task.operation.symbol().to_string(),
            operation_time: task.simulated_duration_ms,
        }
    }
}

/// Response body of `GET /internal/task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TaskEnvelope {
    pub task: TaskAssignment,
}

/// Request body of `POST /internal/task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TaskResultReport {
    pub id: String,
    #[serde(with = "crate::number")]
    #[schema(value_type = f64)]
    pub result: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ExpressionId;
    use crate::task::{Operand, Operation};

    #[test]
    fn assignment_uses_bound_operands() {
        let task = Task::binary(
            ExpressionId::new(),
            Operation::Multiply,
            Operand::Bound(3.0),
            Operand::Bound(4.0),
            2000,
        );
        let assignment = TaskAssignment::from(&task);
        assert_eq!(assignment.id, task.id);
        assert_eq!(assignment.arg1, 3.0);
        assert_eq!(assignment.arg2, 4.0);
        assert_eq!(assignment.operation, "*");
        assert_eq!(assignment.operation_time, 2000);
    }

    #[test]
    fn envelope_matches_worker_contract() {
        let task = Task::binary(
            ExpressionId::new(),
            Operation::Add,
            Operand::Bound(2.0),
            Operand::Bound(3.0),
            1000,
        );
        let json = serde_json::to_value(TaskEnvelope {
            task: TaskAssignment::from(&task),
        })
        .unwrap();
        let inner = &json["task"];
        assert_eq!(inner["id"], task.id.to_string());
        assert_eq!(inner["arg1"], 2.0);
        assert_eq!(inner["arg2"], 3.0);
        assert_eq!(inner["operation"], "+");
        assert_eq!(inner["operation_time"], 1000);
    }

    #[test]
    fn report_accepts_infinite_result() {
        let report: TaskResultReport =
            serde_json::from_str(r#"{"id":"abc","result":"Infinity"}"#).unwrap();
        assert_eq!(report.result, f64::INFINITY);
    }
}
