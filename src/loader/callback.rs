//! Completion-handler loaders
//!
//! These variants report through callbacks and log lines instead of a
//! [`LoadResult`](super::LoadResult). They are not part of the benchmark run;
//! the `demo` subcommand exercises them.
//!
//! The fire-all-at-once loader keeps the legacy completion detection of a
//! shared done counter checked before it is incremented. See
//! [`CompletionCounter`] for the consequences.

use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tracing::{debug, info};

use crate::fetcher::UserFetcher;
use crate::timing::{timed, Stopwatch, Timed};
use crate::UserId;

/// Fetch `user_id` three times in a row and return the total time
///
/// Individual failures are ignored; the next request starts either way.
pub async fn load_three_nested<F>(fetcher: &F, user_id: UserId) -> Duration
where
    F: UserFetcher + ?Sized,
{
    let run = timed(async {
        for step in 1..=3 {
            if let Err(e) = fetcher.fetch_user(user_id).await {
                debug!(step, error = %e, "nested fetch failed, continuing");
            }
        }
    })
    .await;

    info!(
        "loading 3 users with nested callbacks took {:.3} sec",
        run.elapsed_secs()
    );
    run.elapsed
}

/// Fetch `user_id` up to `count` times in a row, then call `on_complete`
///
/// `on_complete` receives `true` if a fetch failed; the remaining fetches are
/// skipped in that case. With `count == 0` it is called with `false` without
/// any request being made.
pub async fn load_nested<F, C>(fetcher: &F, user_id: UserId, count: usize, on_complete: C)
where
    F: UserFetcher + ?Sized,
    C: FnOnce(bool),
{
    for remaining in (1..=count).rev() {
        if let Err(e) = fetcher.fetch_user(user_id).await {
            debug!(remaining, error = %e, "nested load stopped");
            on_complete(true);
            return;
        }
    }
    on_complete(false);
}

/// Time [`load_nested`] and log how long it took
///
/// The returned value is the failure flag handed to the completion callback.
pub async fn execute_nested_load<F>(fetcher: &F, user_id: UserId, count: usize) -> Timed<bool>
where
    F: UserFetcher + ?Sized,
{
    let stopwatch = Stopwatch::start();
    let mut failed = false;
    load_nested(fetcher, user_id, count, |err| failed = err).await;
    let elapsed = stopwatch.elapsed();

    info!(
        failed,
        "nested load of {} users took {:.3} sec",
        count,
        elapsed.as_secs_f64()
    );
    Timed {
        elapsed,
        value: failed,
    }
}

/// Done counter shared by the callbacks of a fire-all-at-once load
///
/// Each callback checks `done == expected - 1` before incrementing, so the
/// counter never goes past `expected - 1`. Consequences:
///
/// - with `expected == 0` completion is never reported
/// - failed requests count as done
/// - completion is reported by the `expected`-th callback to run, whichever
///   request it belongs to, because callbacks run one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCounter {
    expected: usize,
    done: usize,
}

impl CompletionCounter {
    /// Counter for `expected` callbacks
    pub fn new(expected: usize) -> Self {
        Self { expected, done: 0 }
    }

    /// Register one callback; returns `true` when it is the one that reports completion
    pub fn on_callback(&mut self) -> bool {
        if self.expected > 0 && self.done == self.expected - 1 {
            true
        } else {
            self.done += 1;
            false
        }
    }

    /// Callbacks counted so far (the reporting callback is not counted)
    pub fn done(&self) -> usize {
        self.done
    }
}

/// Issue `count` fetches without waiting between them
///
/// Returns the logged elapsed time, or `None` when the completion counter
/// never reported completion.
pub async fn load_all_at_once<F>(fetcher: &F, user_id: UserId, count: usize) -> Option<Duration>
where
    F: UserFetcher + ?Sized,
{
    let stopwatch = Stopwatch::start();
    let mut counter = CompletionCounter::new(count);
    let mut reported = None;

    let mut pending: FuturesUnordered<_> =
        (0..count).map(|_| fetcher.fetch_user(user_id)).collect();

    while let Some(result) = pending.next().await {
        if let Err(e) = &result {
            debug!(error = %e, "fetch failed, counted as done");
        }
        if counter.on_callback() {
            let elapsed = stopwatch.elapsed();
            info!(
                "loading {} users with callbacks at once took {:.3} sec",
                count,
                elapsed.as_secs_f64()
            );
            reported = Some(elapsed);
        }
    }

    reported
}

/// [`load_all_at_once`] with exactly three requests
pub async fn load_three_all_at_once<F>(fetcher: &F, user_id: UserId) -> Option<Duration>
where
    F: UserFetcher + ?Sized,
{
    load_all_at_once(fetcher, user_id, 3).await
}
