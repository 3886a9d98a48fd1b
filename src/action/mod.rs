//! The pull request step: gather commits, run the core, publish the results.
//!
//! Stages:
//! 1. Prepare the checkout so every PR commit exists locally
//! 2. List the PR's commits on GitHub
//! 3. Look up changed files for every commit concurrently
//! 4. Classify, render and resolve the next version
//! 5. Upsert the changelog comment
//! 6. Write the `content`, `version-mask` and `next-version` outputs

pub mod collect;
pub mod config;
pub mod outputs;

use tracing::{info, warn};

use crate::changelog::generate_summary;
use crate::error::ActionError;
use crate::git::prepare_checkout;
use crate::github::{GitHubClient, PullRequestApi, UpsertOutcome, upsert_comment};
use crate::pipeline::{self, NextVersion, PipelineReport};

pub use collect::collect_commits;
pub use config::{ActionConfig, ActionInputs};
pub use outputs::OutputSink;

/// Output holding the rendered changelog.
pub const CONTENT_OUTPUT: &str = "content";
/// Output holding the bumped version.
pub const NEXT_VERSION_OUTPUT: &str = "next-version";
/// Output holding the aggregate mask.
pub const VERSION_MASK_OUTPUT: &str = "version-mask";

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: PipelineReport,
    /// `None` on dry runs.
    pub comment: Option<UpsertOutcome>,
}

/// Run the full step against GitHub.
pub async fn run(config: &ActionConfig) -> Result<RunSummary, ActionError> {
    info!(
        repository = %config.repository,
        pr = config.pull_number,
        branch = %config.branch,
        current_version = config.current_version.as_deref().unwrap_or("(none)"),
        "Generating changelog"
    );

    prepare_checkout(&config.workdir, &config.branch).await?;

    let client = GitHubClient::new(
        &config.token,
        &config.api_url,
        config.repository.clone(),
        config.pull_number,
    )?;

    run_with(config, &client).await
}

/// Run the step after checkout preparation, against any [`PullRequestApi`].
pub async fn run_with<A>(config: &ActionConfig, api: &A) -> Result<RunSummary, ActionError>
where
    A: PullRequestApi + ?Sized,
{
    let listed = api.list_commits().await?;
    info!(count = listed.len(), "Listed pull request commits");

    let commits = collect_commits(&config.workdir, listed).await?;

    let report = pipeline::process(&commits, config.current_version.as_deref());
    info!(
        summary = %generate_summary(&report.document),
        mask = %report.mask,
        "Created changelog"
    );

    let comment = if config.dry_run {
        info!("Dry run: not posting comment");
        println!("{}", report.content);
        None
    } else {
        Some(upsert_comment(api, &config.bot_login, &report.content).await?)
    };

    let sink = OutputSink::from_path(config.output_file.as_deref());
    sink.set_output(CONTENT_OUTPUT, &report.content)?;
    sink.set_output(VERSION_MASK_OUTPUT, report.mask.as_str())?;

    match &report.next_version {
        NextVersion::Bumped { current, next } => {
            sink.set_output(NEXT_VERSION_OUTPUT, &next.to_string())?;
            info!(%current, %next, "New version");
        }
        NextVersion::Unchanged(current) => {
            info!(%current, "No version-relevant changes; next-version not set");
        }
        NextVersion::NotConfigured => {
            info!("No current version configured; next-version not set");
        }
        NextVersion::Invalid(e) => {
            warn!(error = %e, "Ignoring invalid current version; next-version not set");
        }
    }

    Ok(RunSummary { report, comment })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::{CommentAuthor, IssueComment, MockPullRequestApi};
    use crate::github::{DEFAULT_API_URL, DEFAULT_BOT_LOGIN, PullRequestCommit, RepoSlug};
    use crate::version::VersionMask;
    use chrono::Utc;
    use git2::{Repository, Signature};
    use std::path::Path;

    /// Commit `files` (path, content) to the repository and return the sha.
    fn commit_files(repo: &Repository, message: &str, files: &[(&str, &str)]) -> String {
        let workdir = repo.workdir().unwrap().to_path_buf();
        let mut index = repo.index().unwrap();
        for (path, content) in files {
            let full = workdir.join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(&full, content).unwrap();
            index.add_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();

        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
            .to_string()
    }

    fn config(workdir: &Path, output: &Path, version: Option<&str>) -> ActionConfig {
        ActionConfig {
            token: "token".to_string(),
            branch: "main".to_string(),
            current_version: version.map(str::to_string),
            bot_login: DEFAULT_BOT_LOGIN.to_string(),
            repository: RepoSlug::new("owner", "repo"),
            pull_number: 1,
            api_url: DEFAULT_API_URL.to_string(),
            workdir: workdir.to_path_buf(),
            output_file: Some(output.to_path_buf()),
            dry_run: false,
        }
    }

    fn bot_comment(id: u64, body: &str) -> IssueComment {
        IssueComment {
            id,
            body: Some(body.to_string()),
            user: Some(CommentAuthor {
                login: DEFAULT_BOT_LOGIN.to_string(),
            }),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_run_posts_changelog_and_writes_outputs() {
        let repo_dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(repo_dir.path()).unwrap();
        let fix = commit_files(&repo, "fix: null check", &[("src/lib.rs", "a")]);
        let feat = commit_files(
            &repo,
            "feat: add retry",
            &[("src/retry.rs", "b"), ("README.md", "c")],
        );

        let listed = vec![
            PullRequestCommit {
                sha: fix.clone(),
                message: "fix: null check".to_string(),
            },
            PullRequestCommit {
                sha: feat.clone(),
                message: "feat: add retry".to_string(),
            },
        ];

        let mut mock = MockPullRequestApi::new();
        mock.expect_list_commits()
            .times(1)
            .returning(move || Ok(listed.clone()));
        mock.expect_list_comments().times(1).returning(|| Ok(vec![]));
        mock.expect_create_comment()
            .times(1)
            .returning(|body| Ok(bot_comment(1, body)));

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("github_output");
        let summary = run_with(&config(repo_dir.path(), &output, Some("1.2.3")), &mock)
            .await
            .unwrap();

        assert_eq!(summary.report.mask, VersionMask::Minor);
        assert!(matches!(summary.comment, Some(UpsertOutcome::Created(_))));

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("content<<PRLOG_EOF\n# ✨ Changelog\n"));
        assert!(written.contains("version-mask<<PRLOG_EOF\nminor\nPRLOG_EOF\n"));
        assert!(written.contains("next-version<<PRLOG_EOF\n1.3.0\nPRLOG_EOF\n"));
    }

    #[tokio::test]
    async fn test_invalid_version_still_posts_changelog() {
        let repo_dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(repo_dir.path()).unwrap();
        let sha = commit_files(&repo, "feat: something", &[("a.txt", "a")]);

        let listed = vec![PullRequestCommit {
            sha,
            message: "feat: something".to_string(),
        }];

        let mut mock = MockPullRequestApi::new();
        mock.expect_list_commits()
            .returning(move || Ok(listed.clone()));
        mock.expect_list_comments()
            .returning(|| Ok(vec![bot_comment(5, "# ✨ Changelog\n")]));
        mock.expect_update_comment()
            .times(1)
            .returning(|id, body| Ok(bot_comment(id, body)));

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("github_output");
        let summary = run_with(&config(repo_dir.path(), &output, Some("v1.2")), &mock)
            .await
            .unwrap();

        assert!(matches!(summary.report.next_version, NextVersion::Invalid(_)));
        assert!(matches!(summary.comment, Some(UpsertOutcome::Updated(_))));

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("content<<"));
        assert!(!written.contains("next-version"));
    }

    #[tokio::test]
    async fn test_missing_commit_aborts_before_posting() {
        let repo_dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(repo_dir.path()).unwrap();
        commit_files(&repo, "chore: init", &[("a.txt", "a")]);

        let mut mock = MockPullRequestApi::new();
        mock.expect_list_commits().returning(|| {
            Ok(vec![PullRequestCommit {
                sha: "1111111111111111111111111111111111111111".to_string(),
                message: "feat: not fetched".to_string(),
            }])
        });
        mock.expect_list_comments().never();
        mock.expect_create_comment().never();

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("github_output");
        let result = run_with(&config(repo_dir.path(), &output, None), &mock).await;

        assert!(matches!(result, Err(ActionError::Git(_))));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_dry_run_skips_comment() {
        let repo_dir = tempfile::tempdir().unwrap();
        Repository::init(repo_dir.path()).unwrap();

        let mut mock = MockPullRequestApi::new();
        mock.expect_list_commits().returning(|| Ok(vec![]));
        mock.expect_list_comments().never();

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("github_output");
        let mut cfg = config(repo_dir.path(), &output, Some("1.0.0"));
        cfg.dry_run = true;

        let summary = run_with(&cfg, &mock).await.unwrap();
        assert!(summary.comment.is_none());
        assert_eq!(summary.report.content, "# ✨ Changelog\n");
        assert!(matches!(summary.report.next_version, NextVersion::Unchanged(_)));
    }
}
