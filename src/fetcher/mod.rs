//! User record fetchers

use crate::{UserId, UserRecord};
use async_trait::async_trait;

pub mod config;
pub mod gorest_http;
pub mod shared_resources;
pub mod simulated;

/// Fetcher errors
///
/// Payloads are rendered strings so a single failure can be logged, returned
/// from a loader and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetcherError {
    /// Transport-level failure (connection refused, DNS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read to the end
    #[error("body error: {0}")]
    Body(String),

    /// The response body is not valid JSON
    #[error("parse error: {0}")]
    Parse(String),

    /// User ids start at 1
    #[error("invalid user id: {0}")]
    InvalidUserId(u64),

    /// The HTTP client could not be constructed
    #[error("client build error: {0}")]
    ClientBuild(String),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Retrieves a single user record
///
/// Every call is exactly one outbound request. Implementations never retry.
#[async_trait]
pub trait UserFetcher: Send + Sync {
    /// Fetch the record for `user_id`
    ///
    /// # Errors
    /// Transport and body failures, and bodies that are not JSON, are all
    /// reported through [`FetcherError`].
    async fn fetch_user(&self, user_id: UserId) -> FetcherResult<UserRecord>;

    /// Base URL requests are issued against
    fn base_url(&self) -> &str;
}

/// Parse a fully accumulated response body as a user record
pub fn parse_user_record(body: &[u8]) -> FetcherResult<UserRecord> {
    serde_json::from_slice(body).map_err(|e| FetcherError::Parse(e.to_string()))
}
