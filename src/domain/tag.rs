//! Tag identifiers and canonicalization

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical tag identifier.
///
/// Tags are compared by exact string equality. Any trimming or case folding
/// happens once, when the tag is created through a [`TagPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Wrap a string that is already canonical.
    pub fn new(name: impl Into<String>) -> Self {
        Tag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Anchor-safe slug, used for HTML section ids
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.0.len());
        let mut last_dash = true;
        for c in self.0.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
                last_dash = false;
            } else if !last_dash {
                slug.push('-');
                last_dash = true;
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        slug
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How raw tag strings from front matter become [`Tag`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPolicy {
    /// Strip surrounding whitespace (blank tags are dropped)
    pub trim: bool,
    /// Lowercase tags so `Ruby` and `ruby` collapse into one
    pub fold_case: bool,
}

impl Default for TagPolicy {
    fn default() -> Self {
        TagPolicy {
            trim: true,
            fold_case: false,
        }
    }
}

impl TagPolicy {
    /// Canonicalize a single raw tag. Returns `None` for tags that are empty
    /// after canonicalization.
    pub fn canonicalize(&self, raw: &str) -> Option<Tag> {
        let name = if self.trim { raw.trim() } else { raw };
        if name.is_empty() {
            return None;
        }

        let name = if self.fold_case {
            name.to_lowercase()
        } else {
            name.to_string()
        };
        Some(Tag(name))
    }

    /// Canonicalize a list of raw tags, dropping blanks and duplicates while
    /// keeping first-occurrence order.
    pub fn canonicalize_all<I, S>(&self, raw: I) -> Vec<Tag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<Tag> = Vec::new();
        for item in raw {
            if let Some(tag) = self.canonicalize(item.as_ref()) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
}

/// Display order for tags in a rendered index.
///
/// Only the order of tag sections changes; posts within a tag keep their
/// input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TagOrder {
    /// Order in which tags first appear in the post sequence
    #[default]
    FirstSeen,
    /// Lexicographic by tag name
    Alphabetical,
    /// Most posts first, ties broken alphabetically
    Frequency,
}

impl FromStr for TagOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-seen" | "first_seen" | "input" => Ok(TagOrder::FirstSeen),
            "alphabetical" | "alpha" | "name" => Ok(TagOrder::Alphabetical),
            "frequency" | "count" => Ok(TagOrder::Frequency),
            _ => Err(format!(
                "Invalid tag order: '{}'. Valid orders are: first-seen, alphabetical, frequency",
                s
            )),
        }
    }
}

impl fmt::Display for TagOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagOrder::FirstSeen => "first-seen",
            TagOrder::Alphabetical => "alphabetical",
            TagOrder::Frequency => "frequency",
        };
        f.write_str(name)
    }
}
