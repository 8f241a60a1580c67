//! Remote user directory configuration
//!
//! The endpoint layout is fixed: `<base>/public/v1/users/<id>`. Only the base
//! URL and the transport timeouts are configurable.

use crate::UserId;
use std::time::Duration;

/// Default base URL of the public user directory
pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/";

/// Path prefix of the single-user endpoint
pub const USERS_ENDPOINT: &str = "public/v1/users/";

/// HTTP connect timeout (seconds) - time to establish TCP connection
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP request timeout (seconds) - overall time for the entire request
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`GorestHttpClient`](super::gorest_http::GorestHttpClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Base URL, with or without a trailing slash
    pub base_url: String,
    /// Time allowed to establish the connection
    pub connect_timeout: Duration,
    /// Time allowed for the whole request including the body
    pub request_timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl FetcherConfig {
    /// Configuration pointing at a different base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL of the record for `user_id`
    pub fn user_url(&self, user_id: UserId) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/{USERS_ENDPOINT}{user_id}")
    }
}
