//! Commit classification: ordered pattern rules over the commit message.
//!
//! Classification is total. Any message, including an empty one, maps to a
//! [`Category`]; unrecognised shapes land in [`Category::None`].

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::git::Commit;
use crate::version::VersionMask;

/// Pattern: type(scope)!: description, type!: description, type(scope): description or type: description
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]*)\))?(!)?\s*:\s*").expect("header pattern is valid")
});

/// `BREAKING CHANGE:` / `BREAKING-CHANGE:` at the start of the subject or a footer line.
static BREAKING_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^BREAKING[ -]CHANGE\s*:").expect("breaking pattern is valid")
});

/// Subject written as `BREAKING CHANGE: description`.
static BREAKING_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BREAKING[ -]CHANGE\s*:\s*").expect("breaking subject pattern is valid")
});

static MERGE_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Merge (pull request|branch|remote-tracking branch) ")
        .expect("merge pattern is valid")
});

static GIT_REVERT_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^Revert ""#).expect("revert pattern is valid"));

/// Changelog category of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breaking,
    Feature,
    Fix,
    Chore,
    None,
}

impl Category {
    /// Categories that get a changelog section, in section order.
    pub const SECTIONS: [Category; 4] = [
        Category::Breaking,
        Category::Feature,
        Category::Fix,
        Category::Chore,
    ];

    /// The version mask this category contributes.
    pub fn mask(self) -> VersionMask {
        match self {
            Self::Breaking => VersionMask::Major,
            Self::Feature => VersionMask::Minor,
            Self::Fix => VersionMask::Patch,
            Self::Chore | Self::None => VersionMask::None,
        }
    }

    /// Section heading, or `None` for commits left out of the changelog.
    pub fn heading(self) -> Option<&'static str> {
        match self {
            Self::Breaking => Some("💥 Breaking Changes"),
            Self::Feature => Some("🚀 Features"),
            Self::Fix => Some("🐛 Bug Fixes"),
            Self::Chore => Some("🧹 Chores"),
            Self::None => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breaking => "breaking",
            Self::Feature => "feature",
            Self::Fix => "fix",
            Self::Chore => "chore",
            Self::None => "none",
        }
    }

    /// Map a conventional commit type token to a category.
    pub fn from_type_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "feat" | "feature" => Some(Self::Feature),
            "fix" | "bugfix" | "hotfix" | "perf" => Some(Self::Fix),
            "chore" | "docs" | "style" | "refactor" | "test" | "build" | "ci" | "revert" => {
                Some(Self::Chore)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitClassification {
    pub sha: String,
    pub category: Category,
    pub mask: VersionMask,
}

/// A parsed conventional commit header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalHeader<'a> {
    pub kind: &'a str,
    pub scope: Option<&'a str>,
    pub breaking: bool,
    /// Subject text after the `type(scope)!:` prefix.
    pub description: &'a str,
}

/// Parse `type(scope)!: description` from a subject line.
pub fn parse_header(subject: &str) -> Option<ConventionalHeader<'_>> {
    let caps = HEADER.captures(subject)?;
    let prefix = caps.get(0)?;

    Some(ConventionalHeader {
        kind: caps.get(1)?.as_str(),
        scope: caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty()),
        breaking: caps.get(3).is_some(),
        description: subject[prefix.end()..].trim(),
    })
}

/// Classification rules, tried in [`RULES`] order. The first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Merge commits carry no change of their own.
    MergeCommit,
    /// `type!:` subject, or a line starting with `BREAKING CHANGE:`.
    BreakingMarker,
    /// Leading conventional type token.
    TypeToken,
    /// `Revert "..."` subjects generated by `git revert`.
    GitRevert,
}

pub const RULES: [Rule; 4] = [
    Rule::MergeCommit,
    Rule::BreakingMarker,
    Rule::TypeToken,
    Rule::GitRevert,
];

impl Rule {
    fn apply(self, subject: &str, message: &str) -> Option<Category> {
        match self {
            Self::MergeCommit => MERGE_SUBJECT.is_match(subject).then_some(Category::None),
            Self::BreakingMarker => {
                let bang = parse_header(subject).is_some_and(|h| h.breaking);
                (bang || BREAKING_TOKEN.is_match(message)).then_some(Category::Breaking)
            }
            Self::TypeToken => {
                parse_header(subject).and_then(|h| Category::from_type_token(h.kind))
            }
            Self::GitRevert => GIT_REVERT_SUBJECT
                .is_match(subject)
                .then_some(Category::Chore),
        }
    }
}

/// Find the first rule matching a message, with the category it assigns.
pub fn matching_rule(message: &str) -> Option<(Rule, Category)> {
    let subject = message.lines().next().unwrap_or("").trim();
    RULES
        .iter()
        .find_map(|rule| rule.apply(subject, message).map(|category| (*rule, category)))
}

/// Classify a message into a category.
pub fn classify_message(message: &str) -> Category {
    matching_rule(message)
        .map(|(_, category)| category)
        .unwrap_or(Category::None)
}

/// Classify a commit. The mask always follows from the category.
pub fn classify(commit: &Commit) -> CommitClassification {
    let category = classify_message(&commit.message);
    CommitClassification {
        sha: commit.sha.clone(),
        category,
        mask: category.mask(),
    }
}

/// Subject text with the classification prefix removed.
///
/// Returns the raw subject when stripping leaves nothing.
pub fn entry_description(subject: &str) -> &str {
    let subject = subject.trim();
    let stripped = if let Some(header) = parse_header(subject) {
        header.description
    } else if let Some(prefix) = BREAKING_SUBJECT.find(subject) {
        subject[prefix.end()..].trim()
    } else {
        subject
    };

    if stripped.is_empty() { subject } else { stripped }
}
