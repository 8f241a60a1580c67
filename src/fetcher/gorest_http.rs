//! HTTP fetcher for the public user directory
//!
//! One GET per call, body read to the end, then parsed as JSON. The status code
//! is not inspected: a JSON error body is still a record as far as the
//! benchmark is concerned.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};

use super::config::FetcherConfig;
use super::shared_resources::{build_http_client, global_http_client};
use super::{parse_user_record, FetcherError, FetcherResult, UserFetcher};
use crate::metrics::FetchMetrics;
use crate::{UserId, UserRecord};

/// Fetches user records over HTTPS
pub struct GorestHttpClient {
    client: Arc<Client>,
    config: FetcherConfig,
}

impl GorestHttpClient {
    /// Create a fetcher using a caller-provided client
    pub fn new(client: Arc<Client>, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    /// Create a fetcher with its own client built from `config`
    pub fn from_config(config: FetcherConfig) -> FetcherResult<Self> {
        let client = build_http_client(&config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Create a fetcher against the default endpoint using the shared client
    pub fn with_defaults() -> FetcherResult<Self> {
        Ok(Self::new(global_http_client()?, FetcherConfig::default()))
    }

    /// Active configuration
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

#[async_trait]
impl UserFetcher for GorestHttpClient {
    async fn fetch_user(&self, user_id: UserId) -> FetcherResult<UserRecord> {
        let url = self.config.user_url(user_id);
        let metrics = FetchMetrics::start(user_id);
        debug!("Making GET request to: {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                metrics.record("network_error");
                warn!(user_id = %user_id, error = %e, "User request failed");
                return Err(FetcherError::Network(e.to_string()));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                metrics.record("body_error");
                warn!(user_id = %user_id, status = %status, error = %e, "Reading response body failed");
                return Err(FetcherError::Body(e.to_string()));
            }
        };

        match parse_user_record(&body) {
            Ok(record) => {
                metrics.record("ok");
                debug!(user_id = %user_id, status = %status, bytes = body.len(), "User record parsed");
                Ok(record)
            }
            Err(e) => {
                metrics.record("parse_error");
                warn!(user_id = %user_id, status = %status, error = %e, "Response body is not JSON");
                Err(e)
            }
        }
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
