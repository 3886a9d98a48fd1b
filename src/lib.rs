//! prlog - a pull request step that turns conventional commits into a changelog
//! comment and the next semantic version.
//!
//! # Overview
//!
//! prlog lists the commits of an open pull request, classifies each one
//! (breaking, feature, fix, chore or none), renders a markdown changelog that
//! it keeps in a single bot comment on the PR, and bumps the configured
//! current version by the most severe change found.
//!
//! The decision logic lives in [`changelog`], [`version`] and [`pipeline`] and
//! is free of I/O. [`action`] wires it to git and the GitHub API.

pub mod action;
pub mod changelog;
pub mod error;
pub mod git;
pub mod github;
pub mod pipeline;
pub mod retry;
pub mod version;

// Re-export commonly used types
pub use changelog::{
    BANNER, Category, ChangelogDocument, ChangelogSection, CommitClassification, classify, render,
};
pub use error::{ActionError, ConfigError, GitError, GitHubError, OutputError, VersionError};
pub use git::Commit;
pub use pipeline::{NextVersion, PipelineReport, process};
pub use version::{SemanticVersion, VersionMask, bump, resolve_mask};
