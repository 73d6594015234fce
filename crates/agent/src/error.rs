/// Failures talking to the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Orchestrator returned {status}: {body}")]
    Status { status: u16, body: String },
}
