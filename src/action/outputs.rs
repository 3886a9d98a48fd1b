//! GitHub Actions step outputs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::OutputError;

/// Where step outputs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Append to the file named by `GITHUB_OUTPUT`.
    File(PathBuf),
    /// Print `name=value` lines, for runs outside GitHub Actions.
    Stdout,
}

impl OutputSink {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::File(path.to_path_buf()),
            None => {
                warn!("GITHUB_OUTPUT is not set; printing outputs to stdout");
                Self::Stdout
            }
        }
    }

    /// Set one output value.
    pub fn set_output(&self, name: &str, value: &str) -> Result<(), OutputError> {
        match self {
            Self::File(path) => append(path, &format_output(name, value)).map_err(|source| {
                OutputError::WriteFailed {
                    name: name.to_string(),
                    path: path.display().to_string(),
                    source,
                }
            }),
            Self::Stdout => {
                println!("{}={}", name, value);
                Ok(())
            }
        }
    }
}

fn append(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}

/// Encode one output in the `name<<DELIMITER` multiline form.
///
/// The delimiter is extended until it appears nowhere in the value.
pub fn format_output(name: &str, value: &str) -> String {
    let mut delimiter = String::from("PRLOG_EOF");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }

    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}
