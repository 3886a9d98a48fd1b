//! Action inputs and the validated configuration built from them.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::error::ConfigError;
use crate::github::{DEFAULT_API_URL, DEFAULT_BOT_LOGIN, RepoSlug, get_github_token, read_event};

/// Raw inputs from flags or the GitHub Actions environment.
#[derive(Args, Debug, Clone)]
pub struct ActionInputs {
    /// GitHub token (falls back to GITHUB_TOKEN, GH_TOKEN, then `gh auth token`)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base branch of the pull request
    #[arg(long, env = "INPUT_BRANCH")]
    pub branch: Option<String>,

    /// Current version to bump (MAJOR.MINOR.PATCH, optional leading v)
    #[arg(long = "current-version", env = "INPUT_VERSION")]
    pub version: Option<String>,

    /// Login whose previous changelog comment gets replaced
    #[arg(long, env = "INPUT_BOT_LOGIN", default_value = DEFAULT_BOT_LOGIN)]
    pub bot_login: String,

    /// Path to the webhook event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Pull request number (overrides the event payload)
    #[arg(long)]
    pub pr: Option<u64>,

    /// Repository as owner/name (overrides the event payload)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Path of the checked-out repository
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub workdir: PathBuf,

    /// File that receives action outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Render and print outputs without posting a comment
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated configuration for one run. Built once, then passed by reference.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub token: String,
    pub branch: String,
    pub current_version: Option<String>,
    pub bot_login: String,
    pub repository: RepoSlug,
    pub pull_number: u64,
    pub api_url: String,
    pub workdir: PathBuf,
    pub output_file: Option<PathBuf>,
    pub dry_run: bool,
}

impl ActionConfig {
    /// Validate inputs. Missing token or branch is fatal.
    pub fn from_inputs(inputs: ActionInputs) -> Result<Self, ConfigError> {
        let token = get_github_token(inputs.token.as_deref())
            .map_err(|_| ConfigError::MissingToken)?;
        let branch = non_empty(inputs.branch).ok_or(ConfigError::MissingBranch)?;

        let event = match non_empty_path(inputs.event_path) {
            Some(path) => Some(read_event(&path)?),
            None => None,
        };

        let pull_number = match (inputs.pr, &event) {
            (Some(number), _) => number,
            (None, Some(event)) => event.pull_number().ok_or(ConfigError::NotAPullRequest)?,
            (None, None) => return Err(ConfigError::MissingPullRequest),
        };

        let repository = match non_empty(inputs.repository) {
            Some(raw) => RepoSlug::parse(&raw)?,
            None => event
                .as_ref()
                .and_then(|e| e.repository())
                .ok_or(ConfigError::MissingRepository)?,
        };

        let config = Self {
            token,
            branch,
            current_version: non_empty(inputs.version),
            bot_login: non_empty(Some(inputs.bot_login))
                .unwrap_or_else(|| DEFAULT_BOT_LOGIN.to_string()),
            repository,
            pull_number,
            api_url: non_empty(Some(inputs.api_url))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            workdir: non_empty_path(Some(inputs.workdir)).unwrap_or_else(|| PathBuf::from(".")),
            output_file: non_empty_path(inputs.output_file),
            dry_run: inputs.dry_run,
        };

        debug!(
            repository = %config.repository,
            pr = config.pull_number,
            branch = %config.branch,
            "Resolved configuration"
        );

        Ok(config)
    }
}

/// Actions exports unset optional inputs as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}
