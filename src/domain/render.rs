//! Rendering a tag index into pages
//!
//! The index page has one section per tag, each holding a linked list of post
//! titles. Markdown is the primary form; HTML is produced by running that
//! Markdown through `pulldown-cmark`.

use super::index::TagIndex;
use pulldown_cmark::{html, Options, Parser as MdParser};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for a rendered index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexFormat {
    /// `{ "<tag>": [ {"title": ..., "url": ...} ] }`
    #[default]
    Json,
    Markdown,
    Html,
}

impl IndexFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            IndexFormat::Json => "json",
            IndexFormat::Markdown => "md",
            IndexFormat::Html => "html",
        }
    }
}

impl FromStr for IndexFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(IndexFormat::Json),
            "markdown" | "md" => Ok(IndexFormat::Markdown),
            "html" => Ok(IndexFormat::Html),
            _ => Err(format!(
                "Invalid format: '{}'. Valid formats are: json, markdown, html",
                s
            )),
        }
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexFormat::Json => "json",
            IndexFormat::Markdown => "markdown",
            IndexFormat::Html => "html",
        };
        f.write_str(name)
    }
}

/// Escape characters that would break a Markdown link label
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\' | '*' | '_' | '`' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Wrap URLs in angle brackets when they contain spaces or parentheses
fn link_destination(url: &str) -> String {
    if url.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{}>", url.replace('<', "%3C").replace('>', "%3E"))
    } else {
        url.to_string()
    }
}

/// Render the index as a Markdown page.
///
/// # Examples
///
/// ```
/// use tagdex::domain::{build_tag_index, render_markdown, Post};
///
/// let index = build_tag_index(&[Post::new("Hello", "/hello/", ["ruby"])]);
/// let page = render_markdown(&index);
/// assert!(page.contains("## ruby"));
/// assert!(page.contains("- [Hello](/hello/)"));
/// ```
pub fn render_markdown(index: &TagIndex) -> String {
    render_markdown_sections(index, false)
}

fn render_markdown_sections(index: &TagIndex, with_anchors: bool) -> String {
    let mut output = String::from("# Tags\n\n");

    if index.is_empty() {
        output.push_str("*No tags found.*\n");
        return output;
    }

    for (tag, entries) in index.iter() {
        if with_anchors {
            output.push_str(&format!(
                "## {} {{#tag-{}}}\n\n",
                escape_link_text(tag.as_str()),
                tag.slug()
            ));
        } else {
            output.push_str(&format!("## {}\n\n", escape_link_text(tag.as_str())));
        }

        for entry in entries {
            output.push_str(&format!(
                "- [{}]({})\n",
                escape_link_text(&entry.title),
                link_destination(&entry.url)
            ));
        }
        output.push('\n');
    }

    if output.ends_with("\n\n") {
        output.pop();
    }

    output
}

/// Render the index as an HTML fragment, one anchored section per tag
pub fn render_html(index: &TagIndex) -> String {
    let markdown = render_markdown_sections(index, true);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = MdParser::new_ext(&markdown, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// Render the index as pretty-printed JSON
pub fn render_json(index: &TagIndex) -> serde_json::Result<String> {
    serde_json::to_string_pretty(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::index::build_tag_index;
    use crate::domain::post::Post;

    fn sample_index() -> TagIndex {
        build_tag_index(&[
            Post::new("A", "/a", ["ruby", "rails"]),
            Post::new("B", "/b", ["ruby"]),
            Post::new("C", "/c", Vec::<String>::new()),
        ])
    }

    #[test]
    fn test_markdown_sections() {
        let page = render_markdown(&sample_index());
        assert_eq!(
            page,
            "# Tags\n\n## ruby\n\n- [A](/a)\n- [B](/b)\n\n## rails\n\n- [A](/a)\n"
        );
    }

    #[test]
    fn test_markdown_empty_index() {
        let page = render_markdown(&TagIndex::default());
        assert_eq!(page, "# Tags\n\n*No tags found.*\n");
    }

    #[test]
    fn test_markdown_escapes_titles() {
        let index = build_tag_index(&[Post::new("Using [brackets]", "/x y/", ["misc"])]);
        let page = render_markdown(&index);
        assert!(page.contains("- [Using \\[brackets\\]](</x y/>)"));
    }

    #[test]
    fn test_html_has_anchored_sections() {
        let html = render_html(&sample_index());
        assert!(html.contains("<h2 id=\"tag-ruby\">ruby</h2>"));
        assert!(html.contains("<a href=\"/a\">A</a>"));
        assert!(html.contains("<h2 id=\"tag-rails\">rails</h2>"));
        assert!(!html.contains("/c"));
    }

    #[test]
    fn test_html_empty_index() {
        let html = render_html(&TagIndex::default());
        assert!(html.contains("<h1>Tags</h1>"));
        assert!(html.contains("<em>No tags found.</em>"));
    }

    #[test]
    fn test_json_pretty() {
        let json = render_json(&sample_index()).unwrap();
        assert!(json.starts_with("{\n"));
        assert!(json.contains("\"ruby\""));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(IndexFormat::from_str("md"), Ok(IndexFormat::Markdown));
        assert_eq!(IndexFormat::from_str("HTML"), Ok(IndexFormat::Html));
        assert!(IndexFormat::from_str("xml").is_err());
        assert_eq!(IndexFormat::Markdown.extension(), "md");
    }
}
