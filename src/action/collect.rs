//! Fan-out changed-file lookups, fan-in a complete commit list.

use std::collections::HashSet;
use std::path::Path;

use tokio::task::JoinSet;
use tracing::debug;

use crate::error::GitError;
use crate::git::{Commit, changed_files, open_repository};
use crate::github::PullRequestCommit;

/// Attach changed files to every listed commit.
///
/// A sha listed more than once is kept at its first position only.
/// One blocking task runs per commit. The returned list keeps the listing
/// order and is only produced once every task has finished; the first
/// failure aborts the whole collection.
pub async fn collect_commits(
    workdir: &Path,
    listed: Vec<PullRequestCommit>,
) -> Result<Vec<Commit>, GitError> {
    let listed = dedup_by_sha(listed);
    let mut tasks = JoinSet::new();

    for (index, commit) in listed.iter().enumerate() {
        let workdir = workdir.to_path_buf();
        let sha = commit.sha.clone();
        tasks.spawn_blocking(move || {
            let files = open_repository(&workdir).and_then(|repo| changed_files(&repo, &sha));
            (index, files)
        });
    }

    let mut files_by_index: Vec<Option<Vec<String>>> = vec![None; listed.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, files) = joined.map_err(|e| GitError::TaskFailed(e.to_string()))?;
        files_by_index[index] = Some(files?);
    }

    debug!(count = listed.len(), "Collected changed files for all commits");

    Ok(listed
        .into_iter()
        .zip(files_by_index)
        .map(|(commit, files)| {
            Commit::new(commit.sha, commit.message).with_files(files.unwrap_or_default())
        })
        .collect())
}

fn dedup_by_sha(listed: Vec<PullRequestCommit>) -> Vec<PullRequestCommit> {
    let mut seen = HashSet::new();
    let total = listed.len();
    let unique: Vec<PullRequestCommit> = listed
        .into_iter()
        .filter(|commit| seen.insert(commit.sha.clone()))
        .collect();

    if unique.len() < total {
        debug!(
            dropped = total - unique.len(),
            "Ignoring repeated commit listings"
        );
    }
    unique
}
