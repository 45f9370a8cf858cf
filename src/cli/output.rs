//! Output formatting utilities

use crate::application::BuildReport;
use crate::domain::{IndexEntry, Tag};

/// Format tags with their post counts for display.
pub fn format_tag_list(tags: &[(Tag, usize)]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for (tag, count) in tags {
        output.push_str(&format!("{} ({})\n", tag, count));
    }
    output
}

/// Format the posts under a tag for display
pub fn format_entry_list(entries: &[IndexEntry]) -> String {
    if entries.is_empty() {
        return "No posts found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        match entry.date {
            Some(date) => output.push_str(&format!(
                "{}  {}  {}\n",
                date.format("%Y-%m-%d"),
                entry.title,
                entry.url
            )),
            // Undated - pad to keep titles aligned
            None => output.push_str(&format!("            {}  {}\n", entry.title, entry.url)),
        }
    }
    output
}

/// One-line summary of a build written to a file
pub fn format_build_summary(report: &BuildReport) -> String {
    let mut summary = format!(
        "Indexed {} posts under {} tags",
        report.post_count,
        report.index.len()
    );
    if !report.skipped.is_empty() {
        summary.push_str(&format!(" ({} skipped)", report.skipped.len()));
    }
    if let Some(path) = &report.output_path {
        summary.push_str(&format!("\nWrote tag index to: {}", path.display()));
    }
    summary
}
