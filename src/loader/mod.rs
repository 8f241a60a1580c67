//! Loading strategies
//!
//! A loader issues a batch of user requests against a [`UserFetcher`] and
//! reports at most one failure. Two strategies are benchmarked:
//!
//! - [`sequential::load_sequential`] awaits each request before issuing the next
//! - [`bulk::load_bulk`] issues every request at once and waits for all to settle
//!
//! [`callback`] holds the completion-handler variants, reachable through the
//! `demo` subcommand only.

use crate::fetcher::{FetcherError, UserFetcher};
use crate::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod bulk;
pub mod callback;
pub mod sequential;

pub use bulk::load_bulk;
pub use sequential::load_sequential;

/// Outcome of one loader invocation: `Ok(())` or the failure that was caught
pub type LoadResult = Result<(), FetcherError>;

/// Benchmarked loading strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One request at a time
    Blocking,
    /// All requests at once
    NonBlocking,
}

impl Strategy {
    /// Both strategies in benchmark order
    pub const ALL: [Strategy; 2] = [Strategy::Blocking, Strategy::NonBlocking];

    /// Legend label of the strategy's series
    pub fn series_label(self) -> &'static str {
        match self {
            Strategy::Blocking => "Blocking IO Times",
            Strategy::NonBlocking => "Non-Blocking IO Times",
        }
    }

    /// Label value used in metrics and structured logs
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Blocking => "blocking",
            Strategy::NonBlocking => "non_blocking",
        }
    }

    /// Load `count` copies of `user_id` with this strategy
    pub async fn load<F>(self, fetcher: &F, user_id: UserId, count: usize) -> LoadResult
    where
        F: UserFetcher + ?Sized,
    {
        match self {
            Strategy::Blocking => load_sequential(fetcher, user_id, count).await,
            Strategy::NonBlocking => load_bulk(fetcher, user_id, count).await,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
