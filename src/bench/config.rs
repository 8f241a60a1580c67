//! Benchmark configuration

use serde::{Deserialize, Serialize};

use super::{BenchError, BenchResult};
use crate::UserId;

/// First batch size of each phase
pub const DEFAULT_BATCH_START: usize = 1;

/// Batch sizes stay strictly below this bound
pub const DEFAULT_BATCH_END: usize = 50;

/// Distance between consecutive batch sizes
pub const DEFAULT_BATCH_STEP: usize = 5;

/// Half-open range of batch sizes `start, start + step, ...` below `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRange {
    /// First batch size
    pub start: usize,
    /// Exclusive upper bound
    pub end: usize,
    /// Step between sizes
    pub step: usize,
}

impl Default for BatchRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_BATCH_START,
            end: DEFAULT_BATCH_END,
            step: DEFAULT_BATCH_STEP,
        }
    }
}

impl BatchRange {
    /// Create and validate a range
    pub fn new(start: usize, end: usize, step: usize) -> BenchResult<Self> {
        let range = Self { start, end, step };
        range.validate()?;
        Ok(range)
    }

    /// Reject ranges that would produce no samples or never advance
    pub fn validate(&self) -> BenchResult<()> {
        if self.step == 0 {
            return Err(BenchError::InvalidRange("step must be at least 1".to_string()));
        }
        if self.start == 0 {
            return Err(BenchError::InvalidRange(
                "batch sizes start at 1".to_string(),
            ));
        }
        if self.start >= self.end {
            return Err(BenchError::InvalidRange(format!(
                "start {} must be below end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Batch sizes in increasing order
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..self.end).step_by(self.step.max(1))
    }

    /// Number of batch sizes in the range
    pub fn len(&self) -> usize {
        self.sizes().count()
    }

    /// Whether the range yields no sizes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the driver needs besides the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// User fetched by every request
    pub user_id: UserId,
    /// Batch sizes walked by each phase
    pub batches: BatchRange,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            user_id: UserId::DEFAULT,
            batches: BatchRange::default(),
            show_progress: false,
        }
    }
}

impl BenchConfig {
    /// Replace the batch range
    pub fn with_batches(mut self, batches: BatchRange) -> Self {
        self.batches = batches;
        self
    }

    /// Replace the fetched user
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}
