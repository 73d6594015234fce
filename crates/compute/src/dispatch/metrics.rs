use serde::{Deserialize, Serialize};

/// Dispatcher counters exposed on the health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DispatchMetrics {
    pub expressions_submitted: u64,
    pub expressions_completed: u64,
    pub tasks_created: u64,
    pub tasks_claimed: u64,
    /// Distinct tasks completed; repeat reports are not counted again.
    pub tasks_completed: u64,
    /// Polls that found no ready task.
    pub empty_polls: u64,
    /// Result reports naming a task the store does not hold.
    pub unknown_task_reports: u64,
    /// Tasks currently held by the store (gauge, filled on snapshot).
    pub tasks_in_store: u64,
}

impl DispatchMetrics {
    pub fn record_submission(&mut self, task_count: usize, resolved: bool) {
        self.expressions_submitted += 1;
        self.tasks_created += task_count as u64;
        if resolved {
            self.expressions_completed += 1;
        }
    }

    pub fn record_poll(&mut self, claimed: bool) {
        if claimed {
            self.tasks_claimed += 1;
        } else {
            self.empty_polls += 1;
        }
    }
}
