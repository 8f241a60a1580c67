//! # User Load Bench Library
//!
//! Measures how long it takes to load user records from a REST API when the
//! requests are issued one at a time versus all at once, and renders the
//! resulting timing curves.
//!
//! ## Quick Start
//!
//! ```no_run
//! use user_load_bench::bench::{BenchConfig, BenchmarkDriver};
//! use user_load_bench::fetcher::gorest_http::GorestHttpClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Arc::new(GorestHttpClient::with_defaults()?);
//! let driver = BenchmarkDriver::new(fetcher, BenchConfig::default())?;
//! let report = driver.run().await?;
//! println!("{} blocking samples", report.blocking.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`fetcher`] - Single-request user fetcher and its HTTP implementation
//! - [`loader`] - Sequential, bulk and callback-style loading strategies
//! - [`timing`] - Scoped stopwatch around a unit of async work
//! - [`bench`] - Benchmark driver producing one series per strategy
//! - [`chart`] - Renderers for the recorded series
//! - [`cli`] - Command line surface of the binary

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// Benchmark driver and recorded series
pub mod bench;

/// Chart renderers
pub mod chart;

/// CLI command implementations
pub mod cli;

/// User record fetchers
pub mod fetcher;

/// Loading strategies
pub mod loader;

/// Metrics emission helpers
pub mod metrics;

/// Scoped timing helpers
pub mod timing;

pub use fetcher::{FetcherError, FetcherResult, UserFetcher};

/// Untyped user record as returned by the remote API.
///
/// The benchmark never looks inside it.
pub type UserRecord = serde_json::Value;

/// Identifier selecting one remote user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(NonZeroU64);

impl UserId {
    /// The user every loader fetches unless told otherwise
    pub const DEFAULT: UserId = match NonZeroU64::new(100) {
        Some(id) => UserId(id),
        None => unreachable!(),
    };

    /// Create a user id, rejecting zero
    pub fn new(id: u64) -> FetcherResult<Self> {
        NonZeroU64::new(id)
            .map(UserId)
            .ok_or(FetcherError::InvalidUserId(id))
    }

    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for UserId {
    type Error = FetcherError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.get()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a valid user id"))?;
        UserId::new(raw).map_err(|e| e.to_string())
    }
}
