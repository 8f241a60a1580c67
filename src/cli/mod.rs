//! CLI command implementations

pub mod demo;
pub mod error;
pub mod run;

pub use demo::{DemoArgs, DemoPattern};
pub use error::CliError;
pub use run::RunArgs;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::fetcher::config::{FetcherConfig, DEFAULT_BASE_URL};
use crate::fetcher::gorest_http::GorestHttpClient;
use crate::fetcher::simulated::SimulatedFetcher;
use crate::fetcher::UserFetcher;
use crate::UserId;

/// User Load Bench CLI
#[derive(Parser, Debug)]
#[command(name = "user-load-bench")]
#[command(about = "Compare one-by-one and bulk loading of user records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the user directory
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// User id fetched by every request
    #[arg(long, global = true, default_value = "100")]
    pub user_id: UserId,

    /// Answer requests in-process after this many milliseconds instead of calling the API
    #[arg(long, global = true)]
    pub simulate_latency_ms: Option<u64>,

    /// Expose Prometheus metrics on this address (e.g. 127.0.0.1:9090)
    #[arg(long, global = true)]
    pub metrics_addr: Option<SocketAddr>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the blocking and non-blocking phases and render the chart
    Run(RunArgs),
    /// Run one of the callback-style loaders once
    Demo(DemoArgs),
}

impl Cli {
    /// Command to execute, `run` with default arguments when none was given
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }

    /// Fetcher selected by the global options
    pub fn build_fetcher(&self) -> Result<Arc<dyn UserFetcher>, CliError> {
        if let Some(latency_ms) = self.simulate_latency_ms {
            info!(latency_ms, "Using simulated fetcher");
            return Ok(Arc::new(SimulatedFetcher::with_latency(
                Duration::from_millis(latency_ms),
            )));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CliError::InvalidArgument(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        let config = FetcherConfig::default().with_base_url(self.base_url.clone());
        Ok(Arc::new(GorestHttpClient::from_config(config)?))
    }
}
