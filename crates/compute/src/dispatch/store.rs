use std::sync::{Arc, Mutex, MutexGuard};

use distcalc_core::{Expression, ExpressionId, Task, TaskId};
use indexmap::IndexMap;

use super::error::DispatchError;
use super::metrics::DispatchMetrics;

/// Expression and task records plus dispatch counters.
///
/// Only reachable through [`TaskStore::lock`], so every operation below
/// runs inside one critical section.
#[derive(Debug, Default)]
pub struct StoreState {
    pub(crate) expressions: IndexMap<ExpressionId, Expression>,
    /// Insertion order doubles as claim-scan order.
    pub(crate) tasks: IndexMap<TaskId, Task>,
    pub(crate) metrics: DispatchMetrics,
}

impl StoreState {
    pub fn insert_expression(&mut self, expression: Expression) {
        self.expressions.insert(expression.id, expression);
    }

    pub fn insert_task(&mut self, task: Task) {
        self.tasks.insert(task.id, task);
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn expression(&self, id: ExpressionId) -> Option<&Expression> {
        self.expressions.get(&id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether every dependency of `id` exists and has completed.
    ///
    /// Slots are bound only once all dependencies are done, so a ready task
    /// carries each dependency's latest result. Unknown tasks are never ready.
    pub fn is_ready(&mut self, id: TaskId) -> bool {
        let Some(dependencies) = self.tasks.get(&id).map(|t| t.dependencies.clone()) else {
            return false;
        };

        let mut results = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            match self.tasks.get(&dependency) {
                Some(dep) if dep.completed => results.push((dependency, dep.result)),
                _ => return false,
            }
        }

        let Some(task) = self.tasks.get_mut(&id) else {
            return false;
        };
        for (dependency, value) in results {
            task.bind(dependency, value);
        }
        task.operands_bound()
    }

    /// True when no task of the expression is still incomplete.
    pub fn is_root_resolved(&self, expression_id: ExpressionId) -> bool {
        !self
            .tasks
            .values()
            .any(|t| t.expression_id == expression_id && !t.completed)
    }

    /// Drop every task of the expression. Returns how many were removed.
    pub fn purge_expression_tasks(&mut self, expression_id: ExpressionId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| t.expression_id != expression_id);
        before - self.tasks.len()
    }
}

/// Shared handle to the store. Cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    inner: Arc<Mutex<StoreState>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, StoreState>, DispatchError> {
        self.inner
            .lock()
            .map_err(|e| DispatchError::LockPoisoned(e.to_string()))
    }
}
