//! Benchmark driver

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::sync::Arc;
use tracing::info;

use super::{BenchConfig, BenchReport, BenchResult, Series, TimingSample};
use crate::fetcher::UserFetcher;
use crate::loader::Strategy;
use crate::metrics::record_sample;
use crate::timing::timed;

/// Driver phase; phases run in declaration order and never repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sequential loader across all batch sizes
    Blocking,
    /// Bulk loader across all batch sizes
    NonBlocking,
}

impl Phase {
    /// Phases in execution order
    pub const ALL: [Phase; 2] = [Phase::Blocking, Phase::NonBlocking];

    /// Strategy measured in this phase
    pub fn strategy(self) -> Strategy {
        match self {
            Phase::Blocking => Strategy::Blocking,
            Phase::NonBlocking => Strategy::NonBlocking,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Blocking => f.write_str("blocking"),
            Phase::NonBlocking => f.write_str("non-blocking"),
        }
    }
}

/// Runs both phases against one fetcher
pub struct BenchmarkDriver<F: UserFetcher + ?Sized> {
    fetcher: Arc<F>,
    config: BenchConfig,
}

impl<F: UserFetcher + ?Sized> BenchmarkDriver<F> {
    /// Create a driver; the batch range is validated up front
    pub fn new(fetcher: Arc<F>, config: BenchConfig) -> BenchResult<Self> {
        config.batches.validate()?;
        Ok(Self { fetcher, config })
    }

    /// Active configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run the blocking phase, then the non-blocking phase
    pub async fn run(&self) -> BenchResult<BenchReport> {
        let started_at = Utc::now();
        let progress = self.create_progress_bar();

        info!(
            base_url = %self.fetcher.base_url(),
            user_id = %self.config.user_id,
            batches = self.config.batches.len(),
            "Starting benchmark"
        );

        let mut blocking = Series::new(Strategy::Blocking);
        let mut non_blocking = Series::new(Strategy::NonBlocking);
        for phase in Phase::ALL {
            let series = self.run_phase(phase, &progress).await?;
            match phase {
                Phase::Blocking => blocking = series,
                Phase::NonBlocking => non_blocking = series,
            }
        }
        progress.finish_and_clear();

        Ok(BenchReport {
            started_at,
            base_url: self.fetcher.base_url().to_string(),
            user_id: self.config.user_id,
            blocking,
            non_blocking,
        })
    }

    /// Time one loader invocation per batch size
    pub async fn run_phase(&self, phase: Phase, progress: &ProgressBar) -> BenchResult<Series> {
        let strategy = phase.strategy();
        let mut series = Series::new(strategy);
        info!(phase = %phase, "Entering phase");
        progress.set_message(format!("{phase} phase"));

        for batch_size in self.config.batches.sizes() {
            let run = timed(strategy.load(&*self.fetcher, self.config.user_id, batch_size)).await;
            // Loader failures are not inspected; the sample is recorded either way.
            let (elapsed, _outcome) = run.into_parts();

            series.record(TimingSample::new(batch_size, elapsed))?;
            record_sample(strategy.as_str());
            progress.inc(1);
        }

        Ok(series)
    }

    fn create_progress_bar(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let total = (self.config.batches.len() * Phase::ALL.len()) as u64;
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches {msg}")
                .expect("hardcoded template is valid")
                .progress_chars("#>-"),
        );
        pb
    }
}
