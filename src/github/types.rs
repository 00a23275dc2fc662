use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A pull request as returned by `GET /repos/{owner}/{repo}/pulls`.
/// Only the fields the latency computation needs are decoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 42)
    pub number: u64,
    /// When the PR was opened
    pub created_at: DateTime<Utc>,
}

/// A review on a pull request, from `GET .../pulls/{number}/reviews`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    /// Review author. GitHub sends `null` for deleted ("ghost") accounts.
    #[serde(default)]
    pub user: Option<User>,
    /// Absent while the review is still pending.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

impl Review {
    /// Login of the reviewer, if the account still exists.
    pub fn login(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page number to request next; `None` on the last page.
    pub next_page: Option<u32>,
}

/// Which page of a listing to request, and how large pages are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub per_page: u8,
}

/// Identifies the repository whose reviews are analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_deserializes_pending_review() {
        let review: Review = serde_json::from_str(
            r#"{"id": 7, "user": {"login": "alice"}, "state": "PENDING"}"#,
        )
        .unwrap();
        assert_eq!(review.login(), Some("alice"));
        assert!(review.submitted_at.is_none());
    }

    #[test]
    fn test_review_deserializes_ghost_user() {
        let review: Review = serde_json::from_str(
            r#"{"user": null, "submitted_at": "2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(review.login(), None);
        assert!(review.submitted_at.is_some());
    }

    #[test]
    fn test_pull_request_ignores_extra_fields() {
        let pr: PullRequest = serde_json::from_str(
            r#"{"number": 42, "title": "Add login", "state": "closed", "created_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_repo_id_display() {
        let repo = RepoId {
            owner: "org".to_string(),
            repo: "repo".to_string(),
        };
        assert_eq!(repo.to_string(), "org/repo");
    }
}
