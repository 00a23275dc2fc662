pub mod link;
pub mod types;

pub use types::{Page, PageRequest, PullRequest, RepoId, Review};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the GitHub REST API accepts.
pub const MAX_PER_PAGE: u8 = 100;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode GitHub API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid Link header: {0}")]
    InvalidLink(String),
}

/// The two listings the review-time pipeline needs from a code host.
///
/// Both are paginated; implementations report the next page through
/// `Page::next_page` and never fetch more than the requested page.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// List pull requests in every state (open, closed, merged).
    async fn list_pull_requests(
        &self,
        repo: &RepoId,
        page: PageRequest,
    ) -> Result<Page<PullRequest>, GitHubError>;

    /// List the reviews left on pull request `number`.
    async fn list_reviews(
        &self,
        repo: &RepoId,
        number: u64,
        page: PageRequest,
    ) -> Result<Page<Review>, GitHubError>;
}

/// `ReviewSource` backed by the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Requests are sent without credentials when `token` is `None`.
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>, GitHubError> {
        let url = format!("{}{}", self.api_url, path);
        let mut request = self
            .http
            .get(&url)
            .header(USER_AGENT, "review-stats")
            .header(ACCEPT, "application/vnd.github+json")
            .query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let next_page = match response.headers().get(LINK) {
            Some(value) => {
                let value = value
                    .to_str()
                    .map_err(|_| GitHubError::InvalidLink(format!("{value:?}")))?;
                link::parse_next_page(value)?
            }
            None => None,
        };

        let body = response.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&body)?;
        debug!(items = items.len(), ?next_page, "received page");

        Ok(Page { items, next_page })
    }
}

#[async_trait]
impl ReviewSource for GitHubClient {
    #[instrument(skip(self), fields(repo = %repo, page = page.page))]
    async fn list_pull_requests(
        &self,
        repo: &RepoId,
        page: PageRequest,
    ) -> Result<Page<PullRequest>, GitHubError> {
        let path = format!("/repos/{}/{}/pulls", repo.owner, repo.repo);
        self.get_page(
            &path,
            &[
                ("state", "all".to_string()),
                ("per_page", page.per_page.to_string()),
                ("page", page.page.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self), fields(repo = %repo, pr = number, page = page.page))]
    async fn list_reviews(
        &self,
        repo: &RepoId,
        number: u64,
        page: PageRequest,
    ) -> Result<Page<Review>, GitHubError> {
        let path = format!("/repos/{}/{}/pulls/{}/reviews", repo.owner, repo.repo, number);
        self.get_page(
            &path,
            &[
                ("per_page", page.per_page.to_string()),
                ("page", page.page.to_string()),
            ],
        )
        .await
    }
}
