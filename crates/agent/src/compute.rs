use std::time::Duration;

use tracing::warn;

use distcalc_core::wire::TaskAssignment;
use distcalc_core::Operation;

/// Apply the task's operator to its arguments.
///
/// IEEE semantics throughout, so dividing by zero gives an infinity or NaN.
/// An operator the agent doesn't know yields 0.
pub fn evaluate(task: &TaskAssignment) -> f64 {
    match Operation::from_symbol(&task.operation) {
        Some(op) => op.apply(task.arg1, task.arg2),
        None => {
            warn!(task_id = %task.id, operation = %task.operation, "Unknown operator, reporting 0");
            0.0
        }
    }
}

/// Wait out the task's simulated latency, then evaluate it.
pub async fn compute(task: &TaskAssignment) -> f64 {
    if task.operation_time > 0 {
        tokio::time::sleep(Duration::from_millis(task.operation_time)).await;
    }
    evaluate(task)
}
