//! Commit classification and changelog rendering.

pub mod classify;
pub mod format;
pub mod render;

pub use classify::{Category, CommitClassification, Rule, classify, classify_message};
pub use format::{BANNER, ChangelogDocument, ChangelogSection, generate_summary};
pub use render::render;
