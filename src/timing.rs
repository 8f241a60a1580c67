//! Scoped timing helpers
//!
//! A stopwatch is started before a unit of work and read after it settles, so
//! the elapsed time is captured whether the work succeeded or failed. Uses
//! `tokio::time::Instant` so paused-clock tests see deterministic durations.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Output of a timed unit of work together with how long it took
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    /// Wall-clock time from start to settlement
    pub elapsed: Duration,
    /// Whatever the work produced, success or failure alike
    pub value: T,
}

impl<T> Timed<T> {
    /// Elapsed time in fractional seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Split into (elapsed, value)
    pub fn into_parts(self) -> (Duration, T) {
        (self.elapsed, self.value)
    }
}

/// Run `work` to completion and measure it
pub async fn timed<F>(work: F) -> Timed<F::Output>
where
    F: Future,
{
    let stopwatch = Stopwatch::start();
    let value = work.await;
    Timed {
        elapsed: stopwatch.elapsed(),
        value,
    }
}

/// Started stopwatch
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since [`Stopwatch::start`]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
