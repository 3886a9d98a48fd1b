//! Group classified commits into changelog sections.

use crate::git::Commit;

use super::classify::{Category, CommitClassification, entry_description, parse_header};
use super::format::{ChangelogDocument, ChangelogSection};

/// Build the changelog document from classified commits.
///
/// Sections follow [`Category::SECTIONS`]; entries keep input order within a
/// section. `Category::None` commits are left out, and empty sections are
/// omitted.
pub fn render<'a, I>(classified: I) -> ChangelogDocument
where
    I: IntoIterator<Item = (&'a Commit, &'a CommitClassification)>,
{
    let entries: Vec<(Category, String)> = classified
        .into_iter()
        .filter(|(_, c)| c.category != Category::None)
        .map(|(commit, c)| (c.category, format_entry(commit)))
        .collect();

    let sections = Category::SECTIONS
        .iter()
        .filter_map(|category| {
            let heading = category.heading()?;
            let items: Vec<String> = entries
                .iter()
                .filter(|(c, _)| c == category)
                .map(|(_, text)| text.clone())
                .collect();

            (!items.is_empty()).then(|| ChangelogSection {
                category: *category,
                heading: heading.to_string(),
                entries: items,
            })
        })
        .collect();

    ChangelogDocument { sections }
}

/// Entry text for one commit: the subject without its type prefix, with the
/// scope in bold when present.
pub fn format_entry(commit: &Commit) -> String {
    let subject = commit.subject();
    if subject.is_empty() {
        // Breaking footer on a commit with no subject line
        return format!("Commit {}", commit.short_sha());
    }

    let description = entry_description(subject);
    match parse_header(subject).and_then(|h| h.scope) {
        Some(scope) if description != subject => format!("**{}:** {}", scope, description),
        _ => description.to_string(),
    }
}
