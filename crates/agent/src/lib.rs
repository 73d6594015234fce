//! Worker agent: polls the orchestrator for ready tasks, computes them
//! after the simulated latency and reports the results.

pub mod client;
pub mod compute;
pub mod error;
pub mod worker;

pub use client::OrchestratorClient;
pub use compute::{compute, evaluate};
pub use error::AgentError;
pub use worker::{Step, Worker, WorkerPool};
