//! agent: pool of workers evaluating tasks for an orchestrator.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use distcalc_agent::WorkerPool;
use distcalc_core::config::{AgentConfig, DEFAULT_COMPUTING_POWER};

// ── CLI ─────────────────────────────────────────────────────────────

/// Distributed calculator agent: polls the orchestrator and computes tasks.
#[derive(Parser, Debug)]
#[command(name = "agent", version, about)]
struct Cli {
    /// Orchestrator base URL. Overrides ORCHESTRATOR_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Number of parallel workers (0 falls back to the default). Overrides COMPUTING_POWER.
    #[arg(long)]
    computing_power: Option<usize>,

    /// Wait between polls when no task is available. Overrides AGENT_POLL_INTERVAL_MS.
    #[arg(long)]
    poll_interval_ms: Option<u64>,
}

impl Cli {
    fn apply(&self, agent: &mut AgentConfig) {
        if let Some(url) = &self.base_url {
            agent.orchestrator_url = url.clone();
        }
        if let Some(power) = self.computing_power {
            agent.computing_power = if power == 0 { DEFAULT_COMPUTING_POWER } else { power };
        }
        if let Some(ms) = self.poll_interval_ms {
            agent.poll_interval_ms = ms;
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    distcalc_core::config::load_dotenv();
    let mut config = distcalc_core::Config::from_env();
    cli.apply(&mut config.agent);
    config.log_summary();

    let pool = WorkerPool::spawn(&config.agent);
    info!(workers = pool.size(), "Agent running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    pool.shutdown().await;

    Ok(())
}
