//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};
use prlog::Commit;

/// Build an in-memory commit record.
pub fn commit(sha: &str, message: &str) -> Commit {
    Commit::new(sha, message)
}

/// Build commit records with generated shas.
pub fn commits(messages: &[&str]) -> Vec<Commit> {
    messages
        .iter()
        .enumerate()
        .map(|(i, msg)| Commit::new(format!("{:040x}", i + 1), *msg))
        .collect()
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write `files` as (path, content) pairs and commit them. Returns the commit OID.
    pub fn commit_files(&self, message: &str, files: &[(&str, &str)]) -> Oid {
        let mut index = self.repo.index().expect("Failed to get index");

        for (path, content) in files {
            let full = self.dir.path().join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directories");
            }
            std::fs::write(&full, content).expect("Failed to write test file");
            index.add_path(Path::new(path)).expect("Failed to add file");
        }

        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let sig = self.signature();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Delete `path` and commit the removal.
    pub fn commit_removal(&self, message: &str, path: &str) -> Oid {
        std::fs::remove_file(self.dir.path().join(path)).expect("Failed to remove file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .remove_path(Path::new(path))
            .expect("Failed to remove from index");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .expect("Removal needs a parent commit");

        let sig = self.signature();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .expect("Failed to create commit")
    }
}
