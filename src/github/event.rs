//! The `pull_request` event payload GitHub Actions writes to `GITHUB_EVENT_PATH`.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

use super::repo::RepoSlug;

/// The subset of the event payload prlog reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub pull_request: Option<PullRequestRef>,
    pub repository: Option<RepositoryRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub owner: OwnerRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerRef {
    pub login: String,
}

impl PullRequestEvent {
    pub fn pull_number(&self) -> Option<u64> {
        self.pull_request.as_ref().map(|pr| pr.number)
    }

    pub fn repository(&self) -> Option<RepoSlug> {
        self.repository
            .as_ref()
            .map(|r| RepoSlug::new(r.owner.login.clone(), r.name.clone()))
    }
}

/// Read and parse the event payload file.
pub fn read_event(path: &Path) -> Result<PullRequestEvent, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::EventRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_event(&content)
}

pub fn parse_event(json: &str) -> Result<PullRequestEvent, ConfigError> {
    serde_json::from_str(json).map_err(ConfigError::EventParse)
}
