//! Version masks and their aggregation over a commit set.

use serde::{Deserialize, Serialize};

use crate::changelog::CommitClassification;

/// How far a commit (or a whole commit set) moves the version.
///
/// Variants are declared in severity order, so the derived `Ord` is the
/// precedence `none < patch < minor < major`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VersionMask {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl VersionMask {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl std::fmt::Display for VersionMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VersionMask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(format!("Unknown version mask: {}", s)),
        }
    }
}

/// Fold classifications into the highest-severity mask. Empty input is `None`.
pub fn resolve_mask<'a, I>(classifications: I) -> VersionMask
where
    I: IntoIterator<Item = &'a CommitClassification>,
{
    classifications
        .into_iter()
        .map(|c| c.mask)
        .max()
        .unwrap_or_default()
}
