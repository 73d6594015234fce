mod api;
mod cli;
mod router;
mod state;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use distcalc_compute::Dispatcher;

use crate::cli::Cli;
use crate::state::AppState;

fn load_config() -> distcalc_core::Config {
    distcalc_core::config::load_dotenv();
    distcalc_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = load_config();
    cli.apply(&mut config);
    config.log_summary();

    let dispatcher = Dispatcher::new(config.operations);
    let state = Arc::new(AppState::new(dispatcher));
    let app = router::build_router(state);

    let addr = config.server.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Orchestrator listening on http://{}", addr);
    info!("API docs at http://{}/docs", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
