//! Integration tests for changed-file lookup and commit collection.

mod common;

use common::TestRepo;
use prlog::action::collect::collect_commits;
use prlog::error::GitError;
use prlog::git::{changed_files, open_repository};
use prlog::github::PullRequestCommit;

#[test]
fn test_root_commit_lists_every_file() {
    let repo = TestRepo::new();
    let oid = repo.commit_files(
        "chore: initial",
        &[("README.md", "# readme"), ("src/lib.rs", "pub fn x() {}")],
    );

    let files = changed_files(&repo.repo, &oid.to_string()).unwrap();
    assert_eq!(files, vec!["README.md", "src/lib.rs"]);
}

#[test]
fn test_diff_against_first_parent() {
    let repo = TestRepo::new();
    repo.commit_files("chore: initial", &[("a.txt", "a"), ("b.txt", "b")]);
    let oid = repo.commit_files("fix: touch b", &[("b.txt", "b2"), ("c/d.txt", "d")]);

    let files = changed_files(&repo.repo, &oid.to_string()).unwrap();
    assert_eq!(files, vec!["b.txt", "c/d.txt"]);
}

#[test]
fn test_removed_file_is_reported() {
    let repo = TestRepo::new();
    repo.commit_files("chore: initial", &[("keep.txt", "k"), ("gone.txt", "g")]);
    let oid = repo.commit_removal("chore: remove", "gone.txt");

    let files = changed_files(&repo.repo, &oid.to_string()).unwrap();
    assert_eq!(files, vec!["gone.txt"]);
}

#[test]
fn test_unknown_sha_is_commit_not_found() {
    let repo = TestRepo::new();
    repo.commit_files("chore: initial", &[("a.txt", "a")]);

    let missing = "1234567890123456789012345678901234567890";
    let result = changed_files(&repo.repo, missing);
    assert!(matches!(result, Err(GitError::CommitNotFound(sha, _)) if sha == missing));

    let result = changed_files(&repo.repo, "not-a-sha");
    assert!(matches!(result, Err(GitError::CommitNotFound(_, _))));
}

#[test]
fn test_open_repository_from_subdirectory() {
    let repo = TestRepo::new();
    repo.commit_files("chore: initial", &[("nested/file.txt", "x")]);

    let opened = open_repository(&repo.path().join("nested"));
    assert!(opened.is_ok());
}

#[test]
fn test_open_repository_outside_git_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = open_repository(dir.path());
    assert!(matches!(result, Err(GitError::OpenRepository { .. })));
}

#[tokio::test]
async fn test_collect_keeps_listing_order() {
    let repo = TestRepo::new();
    let mut listed = Vec::new();
    for i in 0..8 {
        let name = format!("file{}.txt", i);
        let message = format!("feat: change {}", i);
        let oid = repo.commit_files(&message, &[(name.as_str(), "content")]);
        listed.push(PullRequestCommit {
            sha: oid.to_string(),
            message,
        });
    }

    let commits = collect_commits(repo.path(), listed.clone()).await.unwrap();

    assert_eq!(commits.len(), listed.len());
    for (i, (commit, source)) in commits.iter().zip(&listed).enumerate() {
        assert_eq!(commit.sha, source.sha);
        assert_eq!(commit.message, source.message);
        assert_eq!(commit.files, vec![format!("file{}.txt", i)]);
    }
}

#[tokio::test]
async fn test_collect_fails_when_any_commit_is_missing() {
    let repo = TestRepo::new();
    let oid = repo.commit_files("feat: present", &[("a.txt", "a")]);

    let listed = vec![
        PullRequestCommit {
            sha: oid.to_string(),
            message: "feat: present".to_string(),
        },
        PullRequestCommit {
            sha: "1234567890123456789012345678901234567890".to_string(),
            message: "fix: not fetched".to_string(),
        },
    ];

    let result = collect_commits(repo.path(), listed).await;
    assert!(matches!(result, Err(GitError::CommitNotFound(_, _))));
}

#[tokio::test]
async fn test_collect_skips_repeated_sha() {
    let repo = TestRepo::new();
    let first = repo.commit_files("fix: first", &[("a.txt", "a")]);
    let second = repo.commit_files("feat: second", &[("b.txt", "b")]);

    let listing = |oid: git2::Oid, message: &str| PullRequestCommit {
        sha: oid.to_string(),
        message: message.to_string(),
    };
    let listed = vec![
        listing(first, "fix: first"),
        listing(second, "feat: second"),
        listing(first, "fix: first"),
    ];

    let commits = collect_commits(repo.path(), listed).await.unwrap();

    let shas: Vec<String> = commits.iter().map(|c| c.sha.clone()).collect();
    assert_eq!(shas, vec![first.to_string(), second.to_string()]);
    assert_eq!(commits[1].files, vec!["b.txt"]);
}

#[tokio::test]
async fn test_collect_empty_list() {
    let repo = TestRepo::new();
    let commits = collect_commits(repo.path(), Vec::new()).await.unwrap();
    assert!(commits.is_empty());
}
