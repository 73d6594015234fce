//! Polling workers and the pool that runs them.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use distcalc_core::config::AgentConfig;
use distcalc_core::TaskId;

use crate::client::OrchestratorClient;
use crate::compute::compute;
use crate::error::AgentError;

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// The orchestrator had nothing ready.
    Idle,
    /// A task was computed and its result reported.
    Computed { task_id: TaskId, result: f64 },
}

/// A single poller. Workers share nothing but the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Worker {
    id: usize,
    client: OrchestratorClient,
    poll_interval: Duration,
}

impl Worker {
    pub fn new(id: usize, client: OrchestratorClient, poll_interval: Duration) -> Self {
        Self {
            id,
            client,
            poll_interval,
        }
    }

    /// Claim, compute and report at most one task.
    pub async fn step(&self) -> Result<Step, AgentError> {
        let Some(task) = self.client.fetch_task().await? else {
            return Ok(Step::Idle);
        };
        debug!(
            worker = self.id,
            task_id = %task.id,
            operation = %task.operation,
            "Task received"
        );

        let result = compute(&task).await;
        self.client.report_result(task.id, result).await?;
        debug!(worker = self.id, task_id = %task.id, result, "Result reported");

        Ok(Step::Computed {
            task_id: task.id,
            result,
        })
    }

    /// Poll until `shutdown` flips to `true`.
    ///
    /// Right after a computed task the next poll is immediate; an idle poll
    /// or a transport error waits the fixed interval. Errors are logged and
    /// dropped; the orchestrator keeps an unreported task claimed.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(worker = self.id, "Worker started");
        while !*shutdown.borrow() {
            let wait = match self.step().await {
                Ok(Step::Computed { .. }) => continue,
                Ok(Step::Idle) => self.poll_interval,
                Err(e) => {
                    warn!(worker = self.id, error = %e, "Poll failed");
                    self.poll_interval
                }
            };
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        info!(worker = self.id, "Worker stopped");
    }
}

/// `computing_power` workers polling the same orchestrator.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl WorkerPool {
    /// Spawn the workers onto the current tokio runtime.
    pub fn spawn(config: &AgentConfig) -> Self {
        let client = OrchestratorClient::new(config.orchestrator_url.clone());
        let poll_interval = Duration::from_millis(config.poll_interval_ms);
        let (shutdown, rx) = watch::channel(false);

        let handles = (0..config.computing_power.max(1))
            .map(|id| {
                let worker = Worker::new(id, client.clone(), poll_interval);
                tokio::spawn(worker.run(rx.clone()))
            })
            .collect();

        info!(
            workers = config.computing_power.max(1),
            url = %client.base_url(),
            "Worker pool started"
        );
        Self { handles, shutdown }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Signal every worker and wait for them to finish their current step.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Worker task panicked");
            }
        }
        info!("Worker pool stopped");
    }
}
