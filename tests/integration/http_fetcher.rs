//! HTTP fetcher against a local user directory

use std::time::Duration;
use tokio::time::Instant;
use user_load_bench::fetcher::config::FetcherConfig;
use user_load_bench::fetcher::gorest_http::GorestHttpClient;
use user_load_bench::fetcher::{FetcherError, UserFetcher};
use user_load_bench::loader::{load_bulk, load_sequential};
use user_load_bench::UserId;

use crate::support::user_server::{
    spawn_user_server, MALFORMED_USER, MISSING_USER, SLOW_USER, SLOW_USER_DELAY,
};

fn fetcher_for(base_url: &str) -> GorestHttpClient {
    GorestHttpClient::from_config(FetcherConfig::default().with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn test_fetch_user_parses_record() {
    let server = spawn_user_server().await;
    let fetcher = fetcher_for(&server.base_url);

    let record = fetcher.fetch_user(UserId::DEFAULT).await.unwrap();

    assert_eq!(record["data"]["id"], 100);
    assert_eq!(record["data"]["status"], "active");
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = spawn_user_server().await;
    let fetcher = fetcher_for(&server.base_url);

    let result = fetcher.fetch_user(UserId::new(MALFORMED_USER).unwrap()).await;

    assert!(matches!(result, Err(FetcherError::Parse(_))), "got {result:?}");
}

#[tokio::test]
async fn test_error_status_with_json_body_is_a_record() {
    let server = spawn_user_server().await;
    let fetcher = fetcher_for(&server.base_url);

    let record = fetcher
        .fetch_user(UserId::new(MISSING_USER).unwrap())
        .await
        .unwrap();

    assert_eq!(record["data"]["message"], "Resource not found");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let server = spawn_user_server().await;
    let base_url = server.base_url.clone();
    drop(server);
    // Give the aborted server task a moment to release the socket.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let result = fetcher_for(&base_url).fetch_user(UserId::DEFAULT).await;

    assert!(matches!(result, Err(FetcherError::Network(_))), "got {result:?}");
}

#[tokio::test]
async fn test_every_fetch_is_one_request() {
    let server = spawn_user_server().await;
    let fetcher = fetcher_for(&server.base_url);

    load_sequential(&fetcher, UserId::DEFAULT, 3).await.unwrap();
    load_bulk(&fetcher, UserId::DEFAULT, 4).await.unwrap();

    assert_eq!(server.hits(), 7);
}

#[tokio::test]
async fn test_bulk_overlaps_slow_requests() {
    let server = spawn_user_server().await;
    let fetcher = fetcher_for(&server.base_url);
    let slow = UserId::new(SLOW_USER).unwrap();

    let start = Instant::now();
    load_bulk(&fetcher, slow, 4).await.unwrap();
    let bulk_elapsed = start.elapsed();

    assert!(bulk_elapsed >= SLOW_USER_DELAY);
    assert!(
        bulk_elapsed < SLOW_USER_DELAY * 3,
        "bulk load of 4 slow users took {bulk_elapsed:?}"
    );
}
