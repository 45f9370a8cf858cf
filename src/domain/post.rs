//! Post records and validation

use super::tag::{Tag, TagPolicy};
use crate::error::{Result, TagdexError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A validated blog post.
///
/// `tags` is an ordered set: canonical, non-empty and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub url: String,
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Post {
    /// Build a post, canonicalizing `tags` with the default [`TagPolicy`]
    pub fn new<I, S>(title: impl Into<String>, url: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Post {
            title: title.into(),
            url: url.into(),
            tags: TagPolicy::default().canonicalize_all(tags),
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Exact membership check on canonical tags
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

/// A post as read from the content store, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub date: Option<NaiveDate>,
    /// Where the draft came from, for error messages
    pub source: String,
}

impl PostDraft {
    pub fn new(source: impl Into<String>) -> Self {
        PostDraft {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Validate into a [`Post`], canonicalizing tags with `policy`.
    ///
    /// Blank titles and URLs count as missing.
    pub fn validate(self, policy: &TagPolicy) -> Result<Post> {
        let title = Self::require(self.title, "title", &self.source)?;
        let url = Self::require(self.url, "url", &self.source)?;

        Ok(Post {
            title,
            url,
            tags: policy.canonicalize_all(&self.tags),
            date: self.date,
        })
    }

    fn require(value: Option<String>, field: &'static str, source: &str) -> Result<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ => Err(TagdexError::MissingField {
                field,
                source_path: source.to_string(),
            }),
        }
    }
}

/// What to do with a post that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Fail the whole build on the first malformed post
    Strict,
    /// Skip malformed posts with a warning
    #[default]
    Lenient,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "true" => Ok(ValidationMode::Strict),
            "lenient" | "false" => Ok(ValidationMode::Lenient),
            _ => Err(format!(
                "Invalid validation mode: '{}'. Use true (strict) or false (lenient)",
                s
            )),
        }
    }
}
