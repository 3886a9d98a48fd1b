//! Repository identification.

use crate::error::GitHubError;

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name`, an SSH remote or an HTTPS remote URL.
    pub fn parse(input: &str) -> Result<Self, GitHubError> {
        let input = input.trim();

        // Handle SSH format: git@github.com:owner/repo.git
        if let Some(path) = input.strip_prefix("git@github.com:") {
            return parse_owner_repo_path(path, input);
        }

        // Handle HTTPS format: https://github.com/owner/repo.git
        if let Some(path) = input.split("github.com/").nth(1) {
            return parse_owner_repo_path(path, input);
        }

        if input.contains("://") {
            return Err(GitHubError::InvalidRepository(input.to_string()));
        }

        parse_owner_repo_path(input, input)
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoSlug {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_owner_repo_path(path: &str, original: &str) -> Result<RepoSlug, GitHubError> {
    let path = path.strip_suffix(".git").unwrap_or(path);
    let parts: Vec<&str> = path.split('/').collect();

    match parts.as_slice() {
        [owner, name, ..] if !owner.is_empty() && !name.is_empty() => {
            Ok(RepoSlug::new(*owner, *name))
        }
        _ => Err(GitHubError::InvalidRepository(original.to_string())),
    }
}
