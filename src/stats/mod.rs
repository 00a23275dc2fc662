pub mod percentile;

pub use percentile::{format_duration, summarize, LatencySummary};

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::fetch::{self, FetchError, NoProgress, Progress};
use crate::github::{PullRequest, RepoId, Review, ReviewSource};

/// Review latencies in seconds, grouped by reviewer login.
///
/// Within a reviewer, samples keep pull-request fetch order and then
/// review order within each pull request.
pub type ReviewTimes = HashMap<String, Vec<f64>>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Failed to list pull requests: {0}")]
    PullRequests(#[source] FetchError),

    #[error("Failed to list reviews for PR #{number}: {source}")]
    Reviews {
        number: u64,
        #[source]
        source: FetchError,
    },
}

/// Where fetch progress is reported while collecting review times.
pub struct ProgressSinks<'a> {
    /// One increment per page of pull requests.
    pub pull_requests: &'a dyn Progress,
    /// One increment per pull request whose reviews were fetched.
    pub reviews: &'a dyn Progress,
}

impl Default for ProgressSinks<'_> {
    fn default() -> Self {
        Self {
            pull_requests: &NoProgress,
            reviews: &NoProgress,
        }
    }
}

/// Collect every submitted review's latency for `repo`, grouped by reviewer.
///
/// Pull requests in all states are listed first, then the reviews of each
/// pull request in turn, strictly one request at a time. Reviews that were
/// never submitted, or whose author account no longer exists, contribute no
/// sample. Any failed request aborts the whole collection.
#[instrument(skip(source, progress), fields(repo = %repo))]
pub async fn collect_review_times(
    source: &dyn ReviewSource,
    repo: &RepoId,
    per_page: u8,
    progress: ProgressSinks<'_>,
) -> Result<ReviewTimes, StatsError> {
    let pulls = fetch::fetch_all(per_page, progress.pull_requests, |page| {
        source.list_pull_requests(repo, page)
    })
    .await
    .map_err(StatsError::PullRequests)?;
    progress.pull_requests.finish();
    info!(pull_requests = pulls.len(), "fetched pull requests");

    progress.reviews.set_total(pulls.len() as u64);
    let mut times = ReviewTimes::new();
    for pull in &pulls {
        let reviews = fetch::fetch_all(per_page, &NoProgress, |page| {
            source.list_reviews(repo, pull.number, page)
        })
        .await
        .map_err(|source| StatsError::Reviews {
            number: pull.number,
            source,
        })?;
        progress.reviews.inc(1);
        debug!(pr = pull.number, reviews = reviews.len(), "fetched reviews");

        record_reviews(&mut times, pull, &reviews);
    }
    progress.reviews.finish();
    info!(reviewers = times.len(), "collected review times");

    Ok(times)
}

/// Append one sample per submitted review of `pull` to `times`.
fn record_reviews(times: &mut ReviewTimes, pull: &PullRequest, reviews: &[Review]) {
    for review in reviews {
        let (Some(login), Some(submitted_at)) = (review.login(), review.submitted_at) else {
            debug!(pr = pull.number, login = ?review.login(), "skipping review without author or submission time");
            continue;
        };
        let latency = submitted_at - pull.created_at;
        let seconds = latency.num_milliseconds() as f64 / 1000.0;
        times.entry(login.to_string()).or_default().push(seconds);
    }
}
