//! Benchmark observability metrics
//!
//! ## Architecture
//!
//! - Uses `metrics` crate for low-overhead metric collection
//! - Optional Prometheus exporter for a scraping endpoint
//! - Without an installed recorder every call is a no-op, so library users
//!   and tests pay nothing

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::Lazy;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::UserId;

/// Global metrics registry initialization flag
static METRICS_INITIALIZED: Lazy<Arc<RwLock<bool>>> = Lazy::new(|| Arc::new(RwLock::new(false)));

/// Initialize metrics system with Prometheus exporter
///
/// Idempotent: a second call is a no-op.
///
/// # Arguments
/// * `addr` - Socket address to bind Prometheus scrape endpoint (e.g., "0.0.0.0:9090")
pub async fn init_metrics(addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let mut initialized = METRICS_INITIALIZED.write().await;
    if *initialized {
        debug!("Metrics already initialized, skipping");
        return Ok(());
    }

    info!("Initializing metrics system on {}", addr);

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(
        "user_fetch_requests_total",
        Unit::Count,
        "Total number of user record requests, labelled by outcome"
    );

    describe_histogram!(
        "user_fetch_duration_seconds",
        Unit::Seconds,
        "Duration of a single user record request"
    );

    describe_histogram!(
        "load_duration_seconds",
        Unit::Seconds,
        "Duration of one loader invocation, labelled by strategy"
    );

    describe_counter!(
        "bench_samples_total",
        Unit::Count,
        "Timing samples recorded by the benchmark driver"
    );

    *initialized = true;
    info!("Metrics system initialized successfully on {}", addr);
    Ok(())
}

/// Check if metrics system is initialized
pub async fn is_initialized() -> bool {
    *METRICS_INITIALIZED.read().await
}

/// Timing for one user record request
pub struct FetchMetrics {
    user_id: UserId,
    start_time: Instant,
}

impl FetchMetrics {
    /// Start recording a request for `user_id`
    pub fn start(user_id: UserId) -> Self {
        Self {
            user_id,
            start_time: Instant::now(),
        }
    }

    /// Record the request outcome; `outcome` is a short label such as "ok" or "parse_error"
    pub fn record(&self, outcome: &'static str) -> Duration {
        let duration = self.start_time.elapsed();

        counter!("user_fetch_requests_total", "outcome" => outcome).increment(1);
        histogram!("user_fetch_duration_seconds").record(duration.as_secs_f64());

        debug!(
            user_id = %self.user_id,
            outcome = outcome,
            duration_ms = duration.as_millis(),
            "User fetch finished"
        );
        duration
    }
}

/// Record one loader invocation
pub fn record_load(strategy: &'static str, batch_size: usize, elapsed: Duration, failed: bool) {
    let failed_label = if failed { "true" } else { "false" };
    histogram!(
        "load_duration_seconds",
        "strategy" => strategy,
        "failed" => failed_label,
    )
    .record(elapsed.as_secs_f64());

    debug!(
        strategy = strategy,
        batch_size = batch_size,
        elapsed_ms = elapsed.as_millis(),
        failed = failed,
        "Load recorded"
    );
}

/// Record one benchmark sample
pub fn record_sample(strategy: &'static str) {
    counter!("bench_samples_total", "strategy" => strategy).increment(1);
}
