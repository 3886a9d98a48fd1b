//! Version mask resolution and semver bumping.

pub mod bump;
pub mod mask;

pub use bump::{SemanticVersion, bump};
pub use mask::{VersionMask, resolve_mask};
