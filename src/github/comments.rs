//! Single-comment upsert keyed by bot identity and banner.
//!
//! Runs for the same pull request are triggered one after another, so the
//! read-then-write below is not guarded: the last writer wins.

use tracing::info;

use crate::changelog::BANNER;
use crate::error::GitHubError;

use super::client::{IssueComment, PullRequestApi};

/// Login GitHub Actions posts comments as when using `GITHUB_TOKEN`.
pub const DEFAULT_BOT_LOGIN: &str = "github-actions[bot]";

/// Whether the upsert created a comment or replaced an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(IssueComment),
    Updated(IssueComment),
}

impl UpsertOutcome {
    pub fn comment(&self) -> &IssueComment {
        match self {
            Self::Created(c) | Self::Updated(c) => c,
        }
    }
}

/// Find the most recent comment by `bot_login` that carries the banner.
pub fn find_previous_comment<'a>(
    comments: &'a [IssueComment],
    bot_login: &str,
) -> Option<&'a IssueComment> {
    comments
        .iter()
        .filter(|c| c.user.as_ref().is_some_and(|u| u.login == bot_login))
        .filter(|c| c.body.as_deref().is_some_and(|b| b.contains(BANNER)))
        .max_by_key(|c| (c.created_at, c.id))
}

/// Replace the bot's previous changelog comment, or post a new one.
pub async fn upsert_comment<A>(
    api: &A,
    bot_login: &str,
    body: &str,
) -> Result<UpsertOutcome, GitHubError>
where
    A: PullRequestApi + ?Sized,
{
    let comments = api.list_comments().await?;

    if let Some(previous) = find_previous_comment(&comments, bot_login) {
        info!(comment_id = previous.id, "Updating previous comment");
        let updated = api.update_comment(previous.id, body).await?;
        return Ok(UpsertOutcome::Updated(updated));
    }

    info!("Creating new comment");
    let created = api.create_comment(body).await?;
    Ok(UpsertOutcome::Created(created))
}
