//! HTTP client for the orchestrator's worker protocol.

use reqwest::StatusCode;

use distcalc_core::wire::{TaskAssignment, TaskEnvelope, TaskResultReport};
use distcalc_core::TaskId;

use crate::error::AgentError;

/// Talks to `GET /internal/task` and `POST /internal/task`.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    base_url: String,
    client: reqwest::Client,
}

impl OrchestratorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn task_url(&self) -> String {
        format!("{}/internal/task", self.base_url)
    }

    /// Claim the next ready task. `Ok(None)` when the orchestrator has no work.
    pub async fn fetch_task(&self) -> Result<Option<TaskAssignment>, AgentError> {
        let response = self.client.get(self.task_url()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: TaskEnvelope = ensure_success(response).await?.json().await?;
        Ok(Some(envelope.task))
    }

    /// Report a computed result.
    pub async fn report_result(&self, id: TaskId, result: f64) -> Result<(), AgentError> {
        let report = TaskResultReport {
            id: id.to_string(),
            result,
        };
        let response = self.client.post(self.task_url()).json(&report).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AgentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(AgentError::Status {
        status: status.as_u16(),
        body,
    })
}
