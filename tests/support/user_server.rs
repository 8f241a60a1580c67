//! Local stand-in for the user directory API

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answers with a non-JSON body
pub const MALFORMED_USER: u64 = 500;
/// Answers 404 with a JSON error body
pub const MISSING_USER: u64 = 404;
/// Answers after [`SLOW_USER_DELAY`]
pub const SLOW_USER: u64 = 700;
/// Delay of [`SLOW_USER`]
pub const SLOW_USER_DELAY: Duration = Duration::from_millis(150);

#[derive(Clone, Default)]
struct ServerState {
    hits: Arc<AtomicUsize>,
}

/// Running server; aborted on drop
pub struct UserServer {
    /// Base URL to hand to the fetcher
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl UserServer {
    /// Requests served so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for UserServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn user_handler(State(state): State<ServerState>, Path(id): Path<u64>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match id {
        MALFORMED_USER => (StatusCode::OK, "<html>upstream error</html>").into_response(),
        MISSING_USER => (
            StatusCode::NOT_FOUND,
            Json(json!({ "meta": null, "data": { "message": "Resource not found" } })),
        )
            .into_response(),
        _ => {
            if id == SLOW_USER {
                tokio::time::sleep(SLOW_USER_DELAY).await;
            }
            Json(json!({
                "meta": null,
                "data": { "id": id, "name": "Test User", "status": "active" }
            }))
            .into_response()
        }
    }
}

/// Bind to an ephemeral port and serve `/public/v1/users/:id`
pub async fn spawn_user_server() -> UserServer {
    let state = ServerState::default();
    let hits = state.hits.clone();
    let app = Router::new()
        .route("/public/v1/users/:id", get(user_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    UserServer {
        base_url: format!("http://{addr}/"),
        hits,
        handle,
    }
}
