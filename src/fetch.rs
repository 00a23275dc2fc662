use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::{debug, info};

use crate::github::{GitHubError, Page, PageRequest};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: GitHubError,
    },

    #[error("Pagination did not advance: page {page} pointed back to page {next}")]
    Stalled { page: u32, next: u32 },
}

/// Observer for fetch progress. Purely informational: nothing it does
/// may influence how or whether fetching continues.
pub trait Progress: Send + Sync {
    /// Announce how many increments to expect, once it is known.
    fn set_total(&self, _total: u64) {}

    fn inc(&self, delta: u64);

    fn finish(&self) {}
}

/// Progress sink that discards every signal.
pub struct NoProgress;

impl Progress for NoProgress {
    fn inc(&self, _delta: u64) {}
}

/// Progress sink that reports each increment as a tracing event.
pub struct LogProgress {
    label: &'static str,
    /// 0 while unknown
    total: AtomicU64,
    done: AtomicU64,
}

impl LogProgress {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            total: AtomicU64::new(0),
            done: AtomicU64::new(0),
        }
    }

    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }
}

impl Progress for LogProgress {
    fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    fn inc(&self, delta: u64) {
        let done = self.done.fetch_add(delta, Ordering::Relaxed) + delta;
        match self.total.load(Ordering::Relaxed) {
            0 => info!(label = self.label, done, "progress"),
            total => info!(label = self.label, done, total, "progress"),
        }
    }

    fn finish(&self) {
        info!(label = self.label, done = self.done(), "finished");
    }
}

/// Drain a paginated collection into a single `Vec`.
///
/// Pages are requested one at a time starting at page 1, and items keep
/// page order then within-page order. Stops once a page reports no next
/// page (a `next_page` of 0 counts as none). The first failing page aborts
/// the whole fetch and nothing collected so far is returned.
///
/// `progress` receives one increment per page received.
pub async fn fetch_all<T, F, Fut>(
    per_page: u8,
    progress: &dyn Progress,
    mut fetch_page: F,
) -> Result<Vec<T>, FetchError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, GitHubError>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let response = fetch_page(PageRequest { page, per_page })
            .await
            .map_err(|source| FetchError::Page { page, source })?;
        debug!(page, received = response.items.len(), next = ?response.next_page, "fetched page");
        items.extend(response.items);
        progress.inc(1);

        match response.next_page {
            None | Some(0) => break,
            Some(next) if next > page => page = next,
            Some(next) => return Err(FetchError::Stalled { page, next }),
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves `sizes.len()` pages of sequential integers.
    fn scripted_pages(sizes: &[usize]) -> Vec<Page<usize>> {
        let mut next_item = 0;
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                let items = (next_item..next_item + size).collect();
                next_item += size;
                let next_page = (i + 1 < sizes.len()).then(|| i as u32 + 2);
                Page { items, next_page }
            })
            .collect()
    }

    #[tokio::test]
    async fn test_three_pages_concatenate_in_order() {
        let pages = scripted_pages(&[100, 100, 37]);
        let requested = Mutex::new(Vec::new());
        let progress = LogProgress::new("items");

        let items = fetch_all(100, &progress, |req| {
            requested.lock().unwrap().push(req);
            let page = pages[req.page as usize - 1].clone();
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 237);
        assert_eq!(items, (0..237).collect::<Vec<_>>());
        assert_eq!(progress.done(), 3);

        let requested = requested.into_inner().unwrap();
        let numbers: Vec<u32> = requested.iter().map(|r| r.page).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(requested.iter().all(|r| r.per_page == 100));
    }

    #[tokio::test]
    async fn test_single_empty_page() {
        let items: Vec<usize> = fetch_all(100, &NoProgress, |_| async {
            Ok(Page {
                items: Vec::new(),
                next_page: None,
            })
        })
        .await
        .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_failure_on_second_page_aborts() {
        let pages = scripted_pages(&[100, 100, 37]);
        let calls = Mutex::new(0u32);

        let result = fetch_all(100, &NoProgress, |req| {
            *calls.lock().unwrap() += 1;
            let outcome = if req.page == 2 {
                Err(GitHubError::Status {
                    status: 502,
                    url: "https://api.github.com/x".to_string(),
                })
            } else {
                Ok(pages[req.page as usize - 1].clone())
            };
            async move { outcome }
        })
        .await;

        assert!(matches!(result, Err(FetchError::Page { page: 2, .. })));
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_zero_next_page_means_done() {
        let items = fetch_all(10, &NoProgress, |_| async {
            Ok(Page {
                items: vec!["a"],
                next_page: Some(0),
            })
        })
        .await
        .unwrap();
        assert_eq!(items, vec!["a"]);
    }

    #[tokio::test]
    async fn test_non_advancing_next_page_is_rejected() {
        let result = fetch_all(10, &NoProgress, |req| async move {
            Ok(Page {
                items: vec![req.page],
                next_page: Some(1),
            })
        })
        .await;
        assert!(matches!(
            result,
            Err(FetchError::Stalled { page: 1, next: 1 })
        ));
    }
}
