//! Run command: the full benchmark

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::{Cli, CliError};
use crate::bench::config::{DEFAULT_BATCH_END, DEFAULT_BATCH_START, DEFAULT_BATCH_STEP};
use crate::bench::{BatchRange, BenchConfig, BenchReport, BenchmarkDriver};
use crate::chart::{render_all, ChartRenderer, CsvRenderer, PlotlyJsonRenderer, TerminalRenderer};

/// Arguments of the run command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// First batch size
    #[arg(long, default_value_t = DEFAULT_BATCH_START)]
    pub start: usize,

    /// Batch sizes stay below this bound
    #[arg(long, default_value_t = DEFAULT_BATCH_END)]
    pub end: usize,

    /// Step between batch sizes
    #[arg(long, default_value_t = DEFAULT_BATCH_STEP)]
    pub step: usize,

    /// Directory for the chart and sample files
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Only print the summary table, write no files
    #[arg(long, default_value_t = false)]
    pub no_chart: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            start: DEFAULT_BATCH_START,
            end: DEFAULT_BATCH_END,
            step: DEFAULT_BATCH_STEP,
            output_dir: PathBuf::from("."),
            no_chart: false,
            quiet: false,
        }
    }
}

impl RunArgs {
    /// Benchmark configuration from these arguments and the global options
    pub fn bench_config(&self, cli: &Cli) -> Result<BenchConfig, CliError> {
        let batches = BatchRange::new(self.start, self.end, self.step)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

        Ok(BenchConfig {
            user_id: cli.user_id,
            batches,
            show_progress: !self.quiet,
        })
    }

    /// Renderers selected by these arguments
    pub fn renderers(&self) -> Vec<Box<dyn ChartRenderer>> {
        let mut renderers: Vec<Box<dyn ChartRenderer>> = vec![Box::new(TerminalRenderer)];
        if !self.no_chart {
            renderers.push(Box::new(PlotlyJsonRenderer::in_dir(&self.output_dir)));
            renderers.push(Box::new(CsvRenderer::in_dir(&self.output_dir)));
        }
        renderers
    }

    /// Run both phases and render the result
    pub async fn execute(&self, cli: &Cli) -> Result<BenchReport, CliError> {
        let config = self.bench_config(cli)?;
        let fetcher = cli.build_fetcher()?;
        let driver = BenchmarkDriver::new(fetcher, config)?;

        let report = driver.run().await?;
        render_all(&self.renderers(), &report.series())?;

        info!(
            blocking_samples = report.blocking.len(),
            non_blocking_samples = report.non_blocking.len(),
            "Benchmark finished"
        );
        Ok(report)
    }
}
