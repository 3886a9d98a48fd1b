//! Parsing and bumping of `MAJOR.MINOR.PATCH` version strings.

use semver::Version;

use crate::error::VersionError;

use super::mask::VersionMask;

/// A release version in canonical `MAJOR.MINOR.PATCH` form.
///
/// A leading `v` on the input is remembered and written back out, so
/// `v1.2.3` bumps to `v1.3.0` and `1.2.3` bumps to `1.3.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    version: Version,
    v_prefix: bool,
}

impl SemanticVersion {
    /// Create an unprefixed version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            version: Version::new(major, minor, patch),
            v_prefix: false,
        }
    }

    /// Same version, rendered with a leading `v`.
    pub fn with_v_prefix(mut self) -> Self {
        self.v_prefix = true;
        self
    }

    /// Parse `1.2.3` or `v1.2.3`.
    ///
    /// Pre-release and build suffixes, leading zeros, missing components and
    /// surrounding text are all rejected. Surrounding whitespace is ignored.
    /// Components must be below `u64::MAX`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidVersionFormat(input.to_string());

        let trimmed = input.trim();
        let (raw, v_prefix) = match trimmed.strip_prefix('v') {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };

        let mut parts = raw.split('.');
        let major = parts.next().and_then(parse_component).ok_or_else(invalid)?;
        let minor = parts.next().and_then(parse_component).ok_or_else(invalid)?;
        let patch = parts.next().and_then(parse_component).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            version: Version::new(major, minor, patch),
            v_prefix,
        })
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    pub fn has_v_prefix(&self) -> bool {
        self.v_prefix
    }

    /// The numeric version, for standard semver comparisons.
    pub fn as_semver(&self) -> &Version {
        &self.version
    }

    /// Apply a mask. `VersionMask::None` returns the version unchanged.
    pub fn bump(&self, mask: VersionMask) -> Self {
        let base = &self.version;
        let version = match mask {
            VersionMask::None => return self.clone(),
            VersionMask::Major => Version::new(base.major.saturating_add(1), 0, 0),
            VersionMask::Minor => Version::new(base.major, base.minor.saturating_add(1), 0),
            VersionMask::Patch => {
                Version::new(base.major, base.minor, base.patch.saturating_add(1))
            }
        };

        Self {
            version,
            v_prefix: self.v_prefix,
        }
    }
}

/// Bump `current` according to `mask`.
pub fn bump(current: &SemanticVersion, mask: VersionMask) -> SemanticVersion {
    current.bump(mask)
}

/// Digits only, no leading zeros except for `0` itself.
///
/// `u64::MAX` is rejected so every parsed component can still be bumped.
fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok().filter(|n| *n < u64::MAX)
}

impl std::str::FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.v_prefix {
            write!(f, "v{}", self.version)
        } else {
            write!(f, "{}", self.version)
        }
    }
}
