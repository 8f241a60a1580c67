//! Non-blocking strategy: every request at once

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{info, warn};

use super::{LoadResult, Strategy};
use crate::fetcher::UserFetcher;
use crate::metrics::record_load;
use crate::timing::timed;
use crate::UserId;

/// Fetch `user_id` `count` times concurrently and wait until all have settled
///
/// All request futures are polled in one burst on the calling task, so every
/// request is in flight before the first response is observed. Every request
/// is awaited; when several fail, the first failure to arrive is returned.
pub async fn load_bulk<F>(fetcher: &F, user_id: UserId, count: usize) -> LoadResult
where
    F: UserFetcher + ?Sized,
{
    let run = timed(async {
        let mut pending: FuturesUnordered<_> =
            (0..count).map(|_| fetcher.fetch_user(user_id)).collect();
        let mut first_failure = None;
        while let Some(result) = pending.next().await {
            if let Err(e) = result {
                first_failure.get_or_insert(e);
            }
        }
        first_failure.map_or(Ok(()), Err)
    })
    .await;

    record_load(
        Strategy::NonBlocking.as_str(),
        count,
        run.elapsed,
        run.value.is_err(),
    );

    match &run.value {
        Ok(()) => info!(
            batch_size = count,
            elapsed_secs = run.elapsed_secs(),
            "loading {} users in bulk took {:.3} sec",
            count,
            run.elapsed_secs()
        ),
        Err(e) => warn!(batch_size = count, error = %e, "bulk load failed"),
    }

    run.value
}
