//! GitHub API operations using octocrab.

pub mod auth;
pub mod client;
pub mod comments;
pub mod event;
pub mod repo;

pub use auth::get_github_token;
pub use client::{
    DEFAULT_API_URL, GitHubClient, IssueComment, PullRequestApi, PullRequestCommit,
};
pub use comments::{DEFAULT_BOT_LOGIN, UpsertOutcome, find_previous_comment, upsert_comment};
pub use event::{PullRequestEvent, read_event};
pub use repo::RepoSlug;
