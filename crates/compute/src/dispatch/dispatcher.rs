use distcalc_core::config::OperationTimes;
use distcalc_core::wire::{TaskAssignment, TaskResultReport};
use distcalc_core::{Expression, ExpressionId, ExpressionView, TaskId};
use tracing::{debug, info};

use crate::compiler::{compile, Root};

use super::error::DispatchError;
use super::metrics::DispatchMetrics;
use super::store::TaskStore;

/// What a reported result did to its expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionOutcome {
    /// Other tasks of the expression are still outstanding.
    Recorded,
    /// The root task finished; the expression now holds its final value.
    ExpressionCompleted {
        expression_id: ExpressionId,
        result: f64,
    },
}

/// Front door to the task store: submission, claims, results and queries.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: TaskStore,
    times: OperationTimes,
}

impl Dispatcher {
    pub fn new(times: OperationTimes) -> Self {
        Self::with_store(TaskStore::new(), times)
    }

    pub fn with_store(store: TaskStore, times: OperationTimes) -> Self {
        Self { store, times }
    }

    /// Compile `source` and register the expression with all of its tasks.
    ///
    /// A lone literal is stored already completed.
    pub fn submit(&self, source: &str) -> Result<ExpressionId, DispatchError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(DispatchError::EmptyExpression);
        }

        let expression_id = ExpressionId::new();
        let compiled = compile(expression_id, source, &self.times)?;
        let task_count = compiled.tasks.len();

        let mut expression = Expression::new(expression_id, source);
        if let Root::Value(value) = compiled.root {
            expression.finish(value);
        }
        let resolved = expression.is_completed();

        let mut state = self.store.lock()?;
        state.insert_expression(expression);
        for task in compiled.tasks {
            state.insert_task(task);
        }
        state.metrics.record_submission(task_count, resolved);
        drop(state);

        info!(
            expression_id = %expression_id,
            tasks = task_count,
            resolved,
            "Expression submitted"
        );
        Ok(expression_id)
    }

    /// Hand out the first unclaimed, incomplete and ready task, marking it claimed.
    ///
    /// `Ok(None)` means there is no work right now.
    pub fn claim(&self) -> Result<Option<TaskAssignment>, DispatchError> {
        let mut state = self.store.lock()?;

        let candidates: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|t| !t.claimed && !t.completed)
            .map(|t| t.id)
            .collect();

        let mut assignment = None;
        for id in candidates {
            if !state.is_ready(id) {
                continue;
            }
            if let Some(task) = state.tasks.get_mut(&id) {
                task.claimed = true;
                assignment = Some(TaskAssignment::from(&*task));
                break;
            }
        }
        state.metrics.record_poll(assignment.is_some());
        drop(state);

        match &assignment {
            Some(task) => debug!(
                task_id = %task.id,
                operation = %task.operation,
                "Task claimed"
            ),
            None => debug!("No ready task"),
        }
        Ok(assignment)
    }

    /// Record a worker's result for `task_id`.
    ///
    /// Not idempotent: reporting the same task twice overwrites the result.
    /// Completing the root finalizes the expression and removes its tasks.
    pub fn complete(&self, task_id: TaskId, result: f64) -> Result<CompletionOutcome, DispatchError> {
        let mut state = self.store.lock()?;

        let Some(task) = state.tasks.get_mut(&task_id) else {
            state.metrics.unknown_task_reports += 1;
            return Err(DispatchError::TaskNotFound(task_id.to_string()));
        };
        let first_report = !task.completed;
        task.complete(result);
        let expression_id = task.expression_id;
        if first_report {
            state.metrics.tasks_completed += 1;
        }

        if !state.expressions.contains_key(&expression_id) {
            return Err(DispatchError::ExpressionNotFound(expression_id.to_string()));
        }
        if !state.is_root_resolved(expression_id) {
            debug!(task_id = %task_id, result, "Task completed");
            return Ok(CompletionOutcome::Recorded);
        }

        if let Some(expression) = state.expressions.get_mut(&expression_id) {
            expression.finish(result);
        }
        let purged = state.purge_expression_tasks(expression_id);
        state.metrics.expressions_completed += 1;
        drop(state);

        info!(
            expression_id = %expression_id,
            result,
            purged,
            "Expression completed"
        );
        Ok(CompletionOutcome::ExpressionCompleted {
            expression_id,
            result,
        })
    }

    /// Record a result as reported over the wire.
    ///
    /// An id that is not a valid task identifier is reported as not found.
    pub fn complete_report(&self, report: &TaskResultReport) -> Result<CompletionOutcome, DispatchError> {
        match report.id.parse::<TaskId>() {
            Ok(task_id) => self.complete(task_id, report.result),
            Err(_) => {
                self.store.lock()?.metrics.unknown_task_reports += 1;
                Err(DispatchError::TaskNotFound(report.id.clone()))
            }
        }
    }

    pub fn expression(&self, id: ExpressionId) -> Result<ExpressionView, DispatchError> {
        self.store
            .lock()?
            .expression(id)
            .map(Expression::view)
            .ok_or_else(|| DispatchError::ExpressionNotFound(id.to_string()))
    }

    /// All expressions in submission order.
    pub fn expressions(&self) -> Result<Vec<ExpressionView>, DispatchError> {
        Ok(self
            .store
            .lock()?
            .expressions
            .values()
            .map(Expression::view)
            .collect())
    }

    /// Snapshot of the dispatch counters.
    pub fn metrics(&self) -> Result<DispatchMetrics, DispatchError> {
        let state = self.store.lock()?;
        let mut metrics = state.metrics.clone();
        metrics.tasks_in_store = state.task_count() as u64;
        Ok(metrics)
    }
}
