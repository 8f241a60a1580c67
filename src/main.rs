//! Main entry point for the user-load-bench CLI

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use user_load_bench::cli::{Cli, CliError, Commands};

/// Initialize tracing subscriber with optional JSON formatting
fn init_tracing() {
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("user_load_bench=info"));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn execute(cli: &Cli) -> Result<(), CliError> {
    if let Some(addr) = cli.metrics_addr {
        user_load_bench::metrics::init_metrics(addr)
            .await
            .map_err(|e| CliError::MetricsError(e.to_string()))?;
    }

    match cli.command() {
        Commands::Run(args) => args.execute(cli).await.map(|_| ()),
        Commands::Demo(args) => args.execute(cli).await,
    }
}

// Requests are multiplexed on one thread; nothing runs in parallel.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = execute(&cli).await.map_err(anyhow::Error::from) {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
