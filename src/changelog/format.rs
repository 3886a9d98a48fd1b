//! Changelog document types and markdown output.

use serde::{Deserialize, Serialize};

use super::classify::Category;

/// Leading line of every rendered changelog.
///
/// The comment upsert locates the bot's previous comment by this string, so it
/// must never change between runs.
pub const BANNER: &str = "# ✨ Changelog";

/// One category section of the changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogSection {
    pub category: Category,
    pub heading: String,
    pub entries: Vec<String>,
}

/// Rendered changelog: sections in fixed category order, none of them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogDocument {
    pub sections: Vec<ChangelogSection>,
}

impl ChangelogDocument {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of entries across sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Render as markdown, starting with [`BANNER`].
    pub fn to_markdown(&self) -> String {
        let mut out = String::from(BANNER);
        out.push('\n');

        for section in &self.sections {
            out.push_str(&format!("\n## {}\n\n", section.heading));
            for entry in &section.entries {
                out.push_str(&format!("- {}\n", entry));
            }
        }

        out
    }
}

impl std::fmt::Display for ChangelogDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

/// Generate a one-line summary for logs.
pub fn generate_summary(document: &ChangelogDocument) -> String {
    let total = document.entry_count();
    if total == 0 {
        return "No changelog entries generated.".to_string();
    }

    let details: Vec<String> = document
        .sections
        .iter()
        .map(|s| format!("{}: {}", s.category, s.entries.len()))
        .collect();

    let entry_word = if total == 1 { "entry" } else { "entries" };

    format!("{} {} ({})", total, entry_word, details.join(", "))
}
