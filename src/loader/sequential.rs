//! Blocking strategy: one request at a time

use tracing::{info, warn};

use super::{LoadResult, Strategy};
use crate::fetcher::{FetcherError, UserFetcher};
use crate::metrics::record_load;
use crate::timing::timed;
use crate::UserId;

/// Fetch `user_id` `count` times, awaiting each response before the next request
///
/// Stops at the first failure and returns it; later requests are never issued.
pub async fn load_sequential<F>(fetcher: &F, user_id: UserId, count: usize) -> LoadResult
where
    F: UserFetcher + ?Sized,
{
    let run = timed(async {
        for _ in 0..count {
            fetcher.fetch_user(user_id).await?;
        }
        Ok::<(), FetcherError>(())
    })
    .await;

    record_load(
        Strategy::Blocking.as_str(),
        count,
        run.elapsed,
        run.value.is_err(),
    );

    match &run.value {
        Ok(()) => info!(
            batch_size = count,
            elapsed_secs = run.elapsed_secs(),
            "loading {} users one by one took {:.3} sec",
            count,
            run.elapsed_secs()
        ),
        Err(e) => warn!(batch_size = count, error = %e, "sequential load aborted"),
    }

    run.value
}
