//! Commit records and per-commit changed-file lookup.

use std::path::Path;

use git2::{Oid, Repository};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitError;

/// A pull request commit with the paths it touched.
///
/// Built once per run from the platform's commit list plus a local diff, and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub files: Vec<String>,
}

impl Commit {
    /// Create a commit record without changed files.
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            files: Vec::new(),
        }
    }

    /// Attach the list of changed paths.
    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    /// The first line of the message, trimmed.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }

    /// Abbreviated sha for display.
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

/// Open the repository that contains `workdir`.
pub fn open_repository(workdir: &Path) -> Result<Repository, GitError> {
    Repository::discover(workdir).map_err(|source| GitError::OpenRepository {
        path: workdir.display().to_string(),
        source,
    })
}

/// List the paths changed by a commit relative to its first parent.
///
/// Root commits are diffed against the empty tree, so every file they add is
/// reported. Paths keep the order libgit2 produces (sorted by path).
pub fn changed_files(repo: &Repository, sha: &str) -> Result<Vec<String>, GitError> {
    let oid = Oid::from_str(sha).map_err(|e| GitError::CommitNotFound(sha.to_string(), e))?;
    let commit = repo
        .find_commit(oid)
        .map_err(|e| GitError::CommitNotFound(sha.to_string(), e))?;

    let tree = commit
        .tree()
        .map_err(|e| GitError::DiffFailed(sha.to_string(), e))?;

    let parent_tree = if commit.parent_count() > 0 {
        let parent = commit
            .parent(0)
            .map_err(|e| GitError::DiffFailed(sha.to_string(), e))?;
        Some(
            parent
                .tree()
                .map_err(|e| GitError::DiffFailed(sha.to_string(), e))?,
        )
    } else {
        None
    };

    let diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
        .map_err(|e| GitError::DiffFailed(sha.to_string(), e))?;

    let files: Vec<String> = diff
        .deltas()
        .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
        .map(|path| path.to_string_lossy().into_owned())
        .collect();

    debug!(sha = %sha, count = files.len(), "Collected changed files");

    Ok(files)
}
