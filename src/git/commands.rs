//! Checkout preparation through the system `git` binary.
//!
//! Fetches shell out to `git` so they inherit the runner's credential helper
//! configured by the checkout step.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::GitError;

/// Check that a `git` executable is on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| GitError::NotInstalled)
}

/// Make every PR commit available locally.
///
/// Steps:
/// 1. `git fetch --prune` (plus `--unshallow` on shallow checkouts)
/// 2. `git fetch --no-tags origin <branch>` - the base branch the PR targets
pub async fn prepare_checkout(workdir: &Path, branch: &str) -> Result<(), GitError> {
    check_git_installed()?;

    let shallow = is_shallow(workdir).await?;
    let mut prune_args = vec!["fetch", "--prune"];
    if shallow {
        prune_args.push("--unshallow");
    }

    info!(shallow, "Fetching full history");
    run_git(workdir, &prune_args, "fetch --prune").await?;

    info!(branch, "Fetching base branch without tags");
    run_git(workdir, &["fetch", "--no-tags", "origin", branch], "fetch --no-tags").await?;

    Ok(())
}

/// Whether the checkout at `workdir` is a shallow clone.
pub async fn is_shallow(workdir: &Path) -> Result<bool, GitError> {
    let output = run_git(
        workdir,
        &["rev-parse", "--is-shallow-repository"],
        "rev-parse",
    )
    .await?;
    Ok(output.trim() == "true")
}

/// Run a git command in `workdir` and return its stdout.
pub(crate) async fn run_git(
    workdir: &Path,
    args: &[&str],
    operation: &str,
) -> Result<String, GitError> {
    debug!(?args, "Running git");

    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .await
        .map_err(|source| GitError::SpawnFailed {
            operation: operation.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed {
            operation: operation.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
