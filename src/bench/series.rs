//! Timing samples and series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{BenchError, BenchResult};
use crate::loader::Strategy;
use crate::UserId;

/// One measurement: how long a batch of `batch_size` requests took
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    /// Number of requests in the batch
    pub batch_size: usize,
    /// Wall-clock seconds for the whole batch
    pub elapsed_secs: f64,
}

impl TimingSample {
    /// Sample from a measured duration
    pub fn new(batch_size: usize, elapsed: Duration) -> Self {
        Self {
            batch_size,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

/// Samples of one strategy, in strictly increasing batch-size order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    strategy: Strategy,
    samples: Vec<TimingSample>,
}

impl Series {
    /// Empty series for `strategy`
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            samples: Vec::new(),
        }
    }

    /// Append a sample; its batch size must exceed the last one
    pub fn record(&mut self, sample: TimingSample) -> BenchResult<()> {
        if let Some(last) = self.samples.last() {
            if sample.batch_size <= last.batch_size {
                return Err(BenchError::NonIncreasingBatch {
                    last: last.batch_size,
                    next: sample.batch_size,
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Strategy the samples were measured with
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        self.strategy.series_label()
    }

    /// Recorded samples
    pub fn samples(&self) -> &[TimingSample] {
        &self.samples
    }

    /// Batch sizes, the x axis
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.batch_size).collect()
    }

    /// Elapsed seconds, the y axis
    pub fn elapsed_secs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.elapsed_secs).collect()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Result of one driver run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Endpoint the requests went to
    pub base_url: String,
    /// User fetched by every request
    pub user_id: UserId,
    /// Sequential loader samples
    pub blocking: Series,
    /// Bulk loader samples
    pub non_blocking: Series,
}

impl BenchReport {
    /// Both series, blocking first
    pub fn series(&self) -> [Series; 2] {
        [self.blocking.clone(), self.non_blocking.clone()]
    }
}
