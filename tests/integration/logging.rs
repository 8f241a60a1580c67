//! Integration tests for logging and tracing

use std::io;
use std::sync::{Arc, Mutex};
use tracing::{info, Instrument};
use tracing_subscriber::EnvFilter;
use user_load_bench::fetcher::simulated::SimulatedFetcher;
use user_load_bench::loader::{load_bulk, load_sequential};
use user_load_bench::UserId;

/// In-memory log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_text() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("user_load_bench=info"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

#[test]
fn test_env_filter_parsing() {
    let _filter = EnvFilter::new("user_load_bench=debug");
    let _filter = EnvFilter::new("warn,user_load_bench::loader=trace");
}

#[tokio::test]
async fn test_sequential_logs_batch_size_and_elapsed() {
    let (logs, _guard) = capture_text();
    let fetcher = SimulatedFetcher::instant();

    load_sequential(&fetcher, UserId::DEFAULT, 3).await.unwrap();

    let lines = logs.lines_containing("took");
    assert_eq!(lines.len(), 1, "captured: {}", logs.contents());
    assert!(lines[0].contains("loading 3 users one by one took"));
    assert!(lines[0].contains("batch_size=3"));
    assert!(lines[0].contains("sec"));
}

#[tokio::test]
async fn test_bulk_logs_batch_size_and_elapsed() {
    let (logs, _guard) = capture_text();
    let fetcher = SimulatedFetcher::instant();

    load_bulk(&fetcher, UserId::DEFAULT, 3).await.unwrap();

    let lines = logs.lines_containing("took");
    assert_eq!(lines.len(), 1, "captured: {}", logs.contents());
    assert!(lines[0].contains("loading 3 users in bulk took"));
    assert!(lines[0].contains("batch_size=3"));
}

#[tokio::test]
async fn test_aborted_sequential_load_logs_no_elapsed_time() {
    let (logs, _guard) = capture_text();
    let fetcher = SimulatedFetcher::instant().failing_on_call(2);

    assert!(load_sequential(&fetcher, UserId::DEFAULT, 3).await.is_err());

    assert!(logs.lines_containing("took").is_empty());
    let aborted = logs.lines_containing("sequential load aborted");
    assert_eq!(aborted.len(), 1);
    assert!(aborted[0].contains("WARN"));
    assert!(aborted[0].contains("simulated failure on call 2"));
}

#[tokio::test]
async fn test_json_format_carries_structured_fields() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new("user_load_bench=info"))
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let fetcher = SimulatedFetcher::instant();
    load_bulk(&fetcher, UserId::DEFAULT, 2).await.unwrap();

    let lines = logs.lines_containing("took");
    assert_eq!(lines.len(), 1);
    let event: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(event["level"], "INFO");
    assert_eq!(event["fields"]["batch_size"], 2);
    assert!(event["fields"]["elapsed_secs"].is_number());
}

#[tokio::test]
async fn test_loaders_log_inside_span() {
    let (logs, _guard) = capture_text();
    let span = tracing::info_span!(target: "user_load_bench", "bench_phase", phase = "blocking");
    let fetcher = SimulatedFetcher::instant();

    let result = async {
        info!("Inside span");
        load_sequential(&fetcher, UserId::DEFAULT, 2).await
    }
    .instrument(span)
    .await;

    assert!(result.is_ok());
    let lines = logs.lines_containing("took");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("bench_phase{"));
    assert!(lines[0].contains("phase="));
}
