//! Front matter extraction from post sources
//!
//! Posts carry their metadata in a fenced block at the top of the file:
//!
//! - `+++` fences hold TOML
//! - `---` fences hold YAML
//!
//! Only the fields the tag index needs are read; everything else is ignored.

use crate::error::{Result, TagdexError};
use chrono::NaiveDate;

/// Which syntax a front matter block uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterKind {
    Toml,
    Yaml,
}

impl FrontMatterKind {
    fn fence(&self) -> &'static str {
        match self {
            FrontMatterKind::Toml => "+++",
            FrontMatterKind::Yaml => "---",
        }
    }
}

/// A front matter block split off its document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatterBlock<'a> {
    pub kind: FrontMatterKind,
    pub block: &'a str,
    pub body: &'a str,
}

/// Metadata read from front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub date: Option<NaiveDate>,
    pub published: bool,
}

impl Default for FrontMatter {
    fn default() -> Self {
        FrontMatter {
            title: None,
            url: None,
            tags: Vec::new(),
            date: None,
            published: true,
        }
    }
}

/// Split a document into its front matter block and body.
///
/// Returns `Ok(None)` when the document has no front matter, and an error
/// message when an opening fence is never closed.
pub fn split_front_matter(text: &str) -> std::result::Result<Option<FrontMatterBlock<'_>>, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let first_line_end = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
    let kind = match text[..first_line_end].trim_end() {
        "+++" => FrontMatterKind::Toml,
        "---" => FrontMatterKind::Yaml,
        _ => return Ok(None),
    };

    let mut offset = first_line_end;
    while offset < text.len() {
        let line_end = text[offset..]
            .find('\n')
            .map(|i| offset + i + 1)
            .unwrap_or(text.len());
        let line = text[offset..line_end].trim_end();

        let closes = line == kind.fence() || (kind == FrontMatterKind::Yaml && line == "...");
        if closes {
            return Ok(Some(FrontMatterBlock {
                kind,
                block: &text[first_line_end..offset],
                body: &text[line_end..],
            }));
        }
        offset = line_end;
    }

    Err(format!("unterminated '{}' block", kind.fence()))
}

/// Read post metadata from a document's front matter.
///
/// `source` names the document in error messages.
pub fn read_front_matter(text: &str, source: &str) -> Result<FrontMatter> {
    let block = split_front_matter(text).map_err(|message| front_matter_error(source, message))?;

    match block {
        None => Ok(FrontMatter::default()),
        Some(FrontMatterBlock {
            kind: FrontMatterKind::Toml,
            block,
            ..
        }) => read_toml(block, source),
        Some(FrontMatterBlock {
            kind: FrontMatterKind::Yaml,
            block,
            ..
        }) => read_yaml(block, source),
    }
}

fn front_matter_error(source: &str, message: impl Into<String>) -> TagdexError {
    TagdexError::FrontMatter {
        source_path: source.to_string(),
        message: message.into(),
    }
}

/// Parse a date prefix such as `2014-03-02` or `2014-03-02 10:00:00 +0100`
fn parse_date(raw: &str, source: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    let prefix = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|_| front_matter_error(source, format!("invalid date '{}'", raw)))
}

/// A whitespace-separated tag string, as Jekyll accepts (`tags: ruby rails`)
fn split_tag_string(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn read_toml(block: &str, source: &str) -> Result<FrontMatter> {
    let table: toml::Table = toml::from_str(block)
        .map_err(|e| front_matter_error(source, format!("invalid TOML: {}", e)))?;

    let mut fm = FrontMatter::default();

    fm.title = table
        .get("title")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    fm.url = table
        .get("url")
        .or_else(|| table.get("permalink"))
        .and_then(|v| v.as_str())
        .map(str::to_string);

    if let Some(value) = table.get("tags").or_else(|| table.get("tag")) {
        fm.tags = match value {
            toml::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            toml::Value::String(s) => split_tag_string(s),
            _ => {
                return Err(front_matter_error(
                    source,
                    "'tags' must be a string or an array of strings",
                ))
            }
        };
    }

    if let Some(value) = table.get("date") {
        fm.date = Some(match value {
            toml::Value::Datetime(dt) => parse_date(&dt.to_string(), source)?,
            toml::Value::String(s) => parse_date(s, source)?,
            _ => return Err(front_matter_error(source, "'date' must be a date")),
        });
    }

    if let Some(published) = table.get("published").and_then(|v| v.as_bool()) {
        fm.published = published;
    }

    Ok(fm)
}

/// Render a YAML scalar as text; sequences, mappings and nulls yield `None`
fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn read_yaml(block: &str, source: &str) -> Result<FrontMatter> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let doc: serde_yaml::Value = serde_yaml::from_str(block)
        .map_err(|e| front_matter_error(source, format!("invalid YAML: {}", e)))?;

    match doc {
        serde_yaml::Value::Mapping(_) => {}
        serde_yaml::Value::Null => return Ok(FrontMatter::default()),
        _ => return Err(front_matter_error(source, "front matter must be a mapping")),
    }

    let scalar = |key: &str| {
        doc.get(key)
            .and_then(yaml_scalar)
            .filter(|s| !s.trim().is_empty())
    };

    let mut fm = FrontMatter {
        title: scalar("title"),
        url: scalar("url").or_else(|| scalar("permalink")),
        ..FrontMatter::default()
    };

    if let Some(value) = doc.get("tags").or_else(|| doc.get("tag")) {
        fm.tags = match value {
            serde_yaml::Value::Sequence(items) => items.iter().filter_map(yaml_scalar).collect(),
            serde_yaml::Value::String(s) => split_tag_string(s),
            serde_yaml::Value::Null => Vec::new(),
            _ => {
                return Err(front_matter_error(
                    source,
                    "'tags' must be a string or a list of strings",
                ))
            }
        };
    }

    if let Some(date) = scalar("date") {
        fm.date = Some(parse_date(&date, source)?);
    }

    match doc.get("published") {
        Some(serde_yaml::Value::Bool(published)) => fm.published = *published,
        // YAML 1.1 spellings still common in Jekyll sites
        Some(serde_yaml::Value::String(s)) => {
            fm.published = !matches!(s.to_lowercase().as_str(), "false" | "no" | "off")
        }
        _ => {}
    }

    Ok(fm)
}
