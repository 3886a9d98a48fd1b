//! Pull request REST calls via octocrab.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GitHubError;
use crate::retry::retry_with_backoff;

use super::repo::RepoSlug;

/// Default API base, overridden by `GITHUB_API_URL` on GitHub Enterprise.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for list endpoints (GitHub's maximum).
pub const PER_PAGE: u32 = 100;

/// Safety limit to prevent infinite pagination loops.
const MAX_PAGES: u32 = 50;

/// A commit as listed on the pull request, before changed files are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestCommit {
    pub sha: String,
    pub message: String,
}

/// Author of an issue comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub login: String,
}

/// An issue comment on the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub user: Option<CommentAuthor>,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of `GET /pulls/{n}/commits` items.
#[derive(Debug, Deserialize)]
struct CommitPayload {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u32,
    page: u32,
}

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// The pull request operations the pipeline needs.
///
/// This abstraction allows mocking GitHub in orchestration tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// List the pull request's commits in the order GitHub returns them
    /// (oldest first).
    async fn list_commits(&self) -> Result<Vec<PullRequestCommit>, GitHubError>;

    /// List every comment on the pull request's issue thread, oldest first.
    async fn list_comments(&self) -> Result<Vec<IssueComment>, GitHubError>;

    /// Replace the body of an existing comment.
    async fn update_comment(
        &self,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, GitHubError>;

    /// Post a new comment on the pull request.
    async fn create_comment(&self, body: &str) -> Result<IssueComment, GitHubError>;
}

/// [`PullRequestApi`] backed by the GitHub REST API.
pub struct GitHubClient {
    octocrab: Octocrab,
    repo: RepoSlug,
    pull_number: u64,
}

impl GitHubClient {
    /// Build an authenticated client for one pull request.
    pub fn new(
        token: &str,
        api_url: &str,
        repo: RepoSlug,
        pull_number: u64,
    ) -> Result<Self, GitHubError> {
        let octocrab = Octocrab::builder()
            .base_uri(api_url.to_string())
            .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?
            .personal_token(token.to_string())
            .build()
            .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?;

        Ok(Self::with_client(octocrab, repo, pull_number))
    }

    /// Use a pre-configured octocrab client.
    ///
    /// This allows dependency injection for testing with mock servers.
    pub fn with_client(octocrab: Octocrab, repo: RepoSlug, pull_number: u64) -> Self {
        Self {
            octocrab,
            repo,
            pull_number,
        }
    }

    fn repo_route(&self) -> String {
        format!("/repos/{}/{}", self.repo.owner, self.repo.name)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        route: &str,
        page: u32,
    ) -> Result<Vec<T>, GitHubError> {
        let params = PageParams {
            per_page: PER_PAGE,
            page,
        };

        self.octocrab
            .get(route, Some(&params))
            .await
            .map_err(|e| map_octocrab_error(e, route))
    }

    /// Fetch every page of a list endpoint, retrying transient failures.
    async fn get_all<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>, GitHubError> {
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let items: Vec<T> = retry_with_backoff(
                || self.get_page(route, page),
                GitHubError::is_transient,
                |e| GitHubError::RetriesExhausted(Box::new(e)),
            )
            .await?;

            let count = items.len();
            all.extend(items);
            debug!(route, page, count, "Fetched page");

            if count < PER_PAGE as usize {
                break;
            }

            page += 1;

            if page > MAX_PAGES {
                warn!(
                    "Reached {}-page safety limit while listing {}",
                    MAX_PAGES, route
                );
                break;
            }
        }

        Ok(all)
    }
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    async fn list_commits(&self) -> Result<Vec<PullRequestCommit>, GitHubError> {
        let route = format!("{}/pulls/{}/commits", self.repo_route(), self.pull_number);
        let payloads: Vec<CommitPayload> = self.get_all(&route).await?;

        Ok(payloads
            .into_iter()
            .map(|p| PullRequestCommit {
                sha: p.sha,
                message: p.commit.message,
            })
            .collect())
    }

    async fn list_comments(&self) -> Result<Vec<IssueComment>, GitHubError> {
        let route = format!(
            "{}/issues/{}/comments",
            self.repo_route(),
            self.pull_number
        );
        self.get_all(&route).await
    }

    async fn update_comment(
        &self,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, GitHubError> {
        let route = format!("{}/issues/comments/{}", self.repo_route(), comment_id);
        self.octocrab
            .patch(&route, Some(&CommentBody { body }))
            .await
            .map_err(|e| map_octocrab_error(e, &route))
    }

    async fn create_comment(&self, body: &str) -> Result<IssueComment, GitHubError> {
        let route = format!(
            "{}/issues/{}/comments",
            self.repo_route(),
            self.pull_number
        );
        self.octocrab
            .post(&route, Some(&CommentBody { body }))
            .await
            .map_err(|e| map_octocrab_error(e, &route))
    }
}

/// Sort an octocrab error into the cases callers react to differently.
fn map_octocrab_error(e: octocrab::Error, route: &str) -> GitHubError {
    // Check error content using both Display and Debug output
    // to handle different octocrab error formats
    let err_display = e.to_string();
    let err_debug = format!("{:?}", e);
    let display_lower = err_display.to_lowercase();
    let debug_lower = err_debug.to_lowercase();

    if display_lower.contains("rate limit") || debug_lower.contains("rate limit") {
        return GitHubError::RateLimited {
            reset_time: "unknown".to_string(),
        };
    }
    if err_display.contains("Bad credentials") || err_debug.contains("Bad credentials") {
        return GitHubError::AuthenticationFailed;
    }
    if err_display.contains("Not Found") || err_debug.contains("Not Found") {
        return GitHubError::NotFound(route.to_string());
    }

    GitHubError::Request {
        operation: route.to_string(),
        source: Box::new(e),
    }
}
