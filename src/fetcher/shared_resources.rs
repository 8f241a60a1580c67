//! Shared HTTP client for all fetcher instances
//!
//! Each fetch must open its own connection, so the shared client keeps no idle
//! connections around. Sharing it only avoids rebuilding the TLS configuration
//! for every fetcher.

use once_cell::sync::OnceCell;
use reqwest::Client;
use std::sync::Arc;

use super::config::FetcherConfig;
use super::{FetcherError, FetcherResult};

static GLOBAL_HTTP_CLIENT: OnceCell<Arc<Client>> = OnceCell::new();

/// Build a client that never reuses a connection across requests
pub fn build_http_client(config: &FetcherConfig) -> FetcherResult<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| FetcherError::ClientBuild(e.to_string()))
}

/// Get the global HTTP client, building it with default timeouts on first use
///
/// Returns a clone of the Arc, which is cheap (just increments ref count)
pub fn global_http_client() -> FetcherResult<Arc<Client>> {
    GLOBAL_HTTP_CLIENT
        .get_or_try_init(|| build_http_client(&FetcherConfig::default()).map(Arc::new))
        .cloned()
}
