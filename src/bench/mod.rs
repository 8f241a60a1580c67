//! Benchmark driver and recorded series
//!
//! The driver runs two phases, blocking then non-blocking. Each phase walks the
//! same range of batch sizes, times one loader invocation per size and appends
//! a [`TimingSample`] to the phase's [`Series`].
//!
//! ```no_run
//! use user_load_bench::bench::{BenchConfig, BenchmarkDriver};
//! use user_load_bench::fetcher::simulated::SimulatedFetcher;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Arc::new(SimulatedFetcher::with_latency(Duration::from_millis(20)));
//! let report = BenchmarkDriver::new(fetcher, BenchConfig::default())?.run().await?;
//! assert_eq!(report.blocking.len(), report.non_blocking.len());
//! # Ok(())
//! # }
//! ```
//!
//! Loader failures never abort a run and are not excluded: a failed batch still
//! yields a sample, usually a short one.

pub mod config;
pub mod driver;
pub mod series;

pub use config::{BatchRange, BenchConfig};
pub use driver::{BenchmarkDriver, Phase};
pub use series::{BenchReport, Series, TimingSample};

use crate::chart::ChartError;

/// Benchmark errors
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// A sample was recorded out of order
    #[error("batch size {next} recorded after {last}; batch sizes must strictly increase")]
    NonIncreasingBatch {
        /// Last recorded batch size
        last: usize,
        /// Rejected batch size
        next: usize,
    },

    /// The configured batch range is unusable
    #[error("invalid batch range: {0}")]
    InvalidRange(String),

    /// Rendering the recorded series failed
    #[error("chart error: {0}")]
    Chart(#[from] ChartError),
}

/// Result type for benchmark operations
pub type BenchResult<T> = Result<T, BenchError>;
