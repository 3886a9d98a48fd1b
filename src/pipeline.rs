//! The decision core: classify, render, resolve the mask, bump the version.
//!
//! Everything here is a pure function of already-materialized data. Callers
//! must hand over the complete commit list for the pull request; the core is
//! never run on a partial set.

use tracing::debug;

use crate::changelog::{ChangelogDocument, CommitClassification, classify, render};
use crate::error::VersionError;
use crate::git::Commit;
use crate::version::{SemanticVersion, VersionMask, resolve_mask};

/// What happened to the configured current version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextVersion {
    /// The version was bumped by a non-`none` mask.
    Bumped {
        current: SemanticVersion,
        next: SemanticVersion,
    },
    /// The aggregate mask is `none`; the version stays as it is.
    Unchanged(SemanticVersion),
    /// No current version was configured.
    NotConfigured,
    /// The configured version did not parse.
    Invalid(VersionError),
}

impl NextVersion {
    /// The value for the `next-version` output, if one should be emitted.
    pub fn output(&self) -> Option<&SemanticVersion> {
        match self {
            Self::Bumped { next, .. } => Some(next),
            _ => None,
        }
    }
}

/// Result of running the core over one pull request.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub classifications: Vec<CommitClassification>,
    pub document: ChangelogDocument,
    /// The rendered document, starting with the changelog banner.
    pub content: String,
    pub mask: VersionMask,
    pub next_version: NextVersion,
}

/// Run classification, rendering and version resolution over `commits`.
pub fn process(commits: &[Commit], current_version: Option<&str>) -> PipelineReport {
    let classifications: Vec<CommitClassification> = commits.iter().map(classify).collect();

    for (commit, classification) in commits.iter().zip(&classifications) {
        debug!(
            sha = %commit.short_sha(),
            category = %classification.category,
            subject = %commit.subject(),
            "Classified commit"
        );
    }

    let document = render(commits.iter().zip(&classifications));
    let content = document.to_markdown();
    let mask = resolve_mask(&classifications);
    let next_version = next_version(current_version, mask);

    PipelineReport {
        classifications,
        document,
        content,
        mask,
        next_version,
    }
}

/// Decide the next version from an optional configured version string.
pub fn next_version(current_version: Option<&str>, mask: VersionMask) -> NextVersion {
    let Some(raw) = current_version.filter(|v| !v.trim().is_empty()) else {
        return NextVersion::NotConfigured;
    };

    match SemanticVersion::parse(raw) {
        Ok(current) if mask == VersionMask::None => NextVersion::Unchanged(current),
        Ok(current) => {
            let next = current.bump(mask);
            NextVersion::Bumped { current, next }
        }
        Err(e) => NextVersion::Invalid(e),
    }
}
