//! GitHub token discovery.
//!
//! Auth order:
//! 1. Explicit token (`--token` / `INPUT_TOKEN`)
//! 2. GITHUB_TOKEN env var
//! 3. GH_TOKEN env var
//! 4. `gh auth token` (gh CLI), for local runs

use std::env;
use std::process::Command;

use tracing::debug;

use crate::error::GitHubError;

/// Get a GitHub token, preferring an explicitly supplied one.
pub fn get_github_token(explicit: Option<&str>) -> Result<String, GitHubError> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(var)
            && !token.trim().is_empty()
        {
            debug!(source = var, "Using GitHub token from environment");
            return Ok(token.trim().to_string());
        }
    }

    if let Some(token) = get_token_from_gh_cli() {
        debug!("Using GitHub token from gh CLI");
        return Ok(token);
    }

    Err(GitHubError::AuthenticationFailed)
}

/// Try to get a token from the gh CLI.
fn get_token_from_gh_cli() -> Option<String> {
    which::which("gh").ok()?;

    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }

    None
}
