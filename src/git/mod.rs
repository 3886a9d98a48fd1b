//! Git operations: changed files via git2-rs, checkout preparation via the git CLI.

pub mod commands;
pub mod commits;

pub use commands::{check_git_installed, prepare_checkout};
pub use commits::{Commit, changed_files, open_repository};
