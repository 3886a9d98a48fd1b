//! Error types for prlog modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("Failed to open repository at {path}: {source}")]
    OpenRepository {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Commit {0} not found in local repository: {1}")]
    CommitNotFound(String, #[source] git2::Error),

    #[error("Failed to diff commit {0}: {1}")]
    DiffFailed(String, #[source] git2::Error),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("Changed-files task did not complete: {0}")]
    TaskFailed(String),
}

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(
        "GitHub authentication failed: no valid auth found. Pass --token, set INPUT_TOKEN or GITHUB_TOKEN, or run 'gh auth login'"
    )]
    AuthenticationFailed,

    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(#[source] Box<octocrab::Error>),

    #[error("GitHub request '{operation}' failed: {source}")]
    Request {
        operation: String,
        #[source]
        source: Box<octocrab::Error>,
    },

    #[error("Rate limited by GitHub API. Resets at: {reset_time}")]
    RateLimited { reset_time: String },

    #[error("Not found on GitHub: {0}")]
    NotFound(String),

    #[error("Invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<GitHubError>),
}

impl GitHubError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Request { .. })
    }
}

/// Errors from version operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format '{0}': expected MAJOR.MINOR.PATCH with an optional leading 'v'")]
    InvalidVersionFormat(String),
}

/// Errors from reading the action configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing auth token. Set the 'token' input or GITHUB_TOKEN")]
    MissingToken,

    #[error("Missing branch. Set the 'branch' input")]
    MissingBranch,

    #[error("No pull request number: pass --pr or run on a pull_request event")]
    MissingPullRequest,

    #[error("No repository: pass --repository owner/name or run inside GitHub Actions")]
    MissingRepository,

    #[error("Failed to read event payload {path}: {source}")]
    EventRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse event payload: {0}")]
    EventParse(#[source] serde_json::Error),

    #[error("Event payload has no pull_request; prlog only runs on pull request events")]
    NotAPullRequest,

    #[error(transparent)]
    Repository(#[from] GitHubError),
}

/// Errors from writing action outputs.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output '{name}' to {path}: {source}")]
    WriteFailed {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
