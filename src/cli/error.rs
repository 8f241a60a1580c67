//! CLI error types and conversions

use crate::bench::BenchError;
use crate::chart::ChartError;
use crate::fetcher::FetcherError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Fetcher error
    #[error("fetcher error: {0}")]
    FetcherError(#[from] FetcherError),

    /// Benchmark error
    #[error("benchmark error: {0}")]
    BenchError(#[from] BenchError),

    /// Chart error
    #[error("chart error: {0}")]
    ChartError(#[from] ChartError),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Metrics exporter could not be started
    #[error("metrics error: {0}")]
    MetricsError(String),
}
