//! In-process fetcher with scripted latency and failures
//!
//! Used by the `--simulate-latency-ms` mode of the binary, by the strategy
//! benchmarks, and as the test double for every loader. Each call is recorded
//! with its issuance and completion instants so tests can assert ordering.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use super::{FetcherError, FetcherResult, UserFetcher};
use crate::{UserId, UserRecord};

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// 1-based position in issuance order
    pub call_index: usize,
    /// Requested user
    pub user_id: UserId,
    /// When the call started
    pub issued_at: Instant,
    /// When the call settled, `None` while in flight
    pub completed_at: Option<Instant>,
    /// Whether the call returned a record
    pub succeeded: bool,
}

/// Fetcher returning canned records after a configurable delay
#[derive(Debug, Default)]
pub struct SimulatedFetcher {
    latency: Duration,
    call_latencies: HashMap<usize, Duration>,
    failing_calls: Vec<usize>,
    calls: AtomicUsize,
    records: Mutex<Vec<CallRecord>>,
}

impl SimulatedFetcher {
    /// Fetcher answering every call instantly and successfully
    pub fn instant() -> Self {
        Self::default()
    }

    /// Fetcher answering every call after `latency`
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Make the call with 1-based index `call_index` fail
    pub fn failing_on_call(mut self, call_index: usize) -> Self {
        self.failing_calls.push(call_index);
        self
    }

    /// Override the latency of one call (1-based)
    pub fn with_call_latency(mut self, call_index: usize, latency: Duration) -> Self {
        self.call_latencies.insert(call_index, latency);
        self
    }

    /// Number of calls issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every recorded call, in issuance order
    pub fn calls(&self) -> Vec<CallRecord> {
        let mut records = self.lock_records().clone();
        records.sort_by_key(|r| r.call_index);
        records
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, Vec<CallRecord>> {
        // A panicking test thread must not hide the calls made before it.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn latency_for(&self, call_index: usize) -> Duration {
        self.call_latencies
            .get(&call_index)
            .copied()
            .unwrap_or(self.latency)
    }
}

#[async_trait]
impl UserFetcher for SimulatedFetcher {
    async fn fetch_user(&self, user_id: UserId) -> FetcherResult<UserRecord> {
        let call_index = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock_records().push(CallRecord {
            call_index,
            user_id,
            issued_at: Instant::now(),
            completed_at: None,
            succeeded: false,
        });

        let latency = self.latency_for(call_index);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let succeeded = !self.failing_calls.contains(&call_index);
        if let Some(record) = self
            .lock_records()
            .iter_mut()
            .find(|r| r.call_index == call_index)
        {
            record.completed_at = Some(Instant::now());
            record.succeeded = succeeded;
        }

        if succeeded {
            Ok(json!({ "meta": null, "data": { "id": user_id.get() } }))
        } else {
            Err(FetcherError::Network(format!(
                "simulated failure on call {call_index}"
            )))
        }
    }

    fn base_url(&self) -> &str {
        "simulated://users"
    }
}
