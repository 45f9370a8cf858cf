//! Tag index aggregation - grouping posts by tag
//!
//! The index is a pure, derived view over an ordered post sequence. It is
//! recomputed from scratch on every build and never mutates its input.

use super::post::Post;
use super::tag::{Tag, TagOrder};
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// A post as listed under a tag
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IndexEntry {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl From<&Post> for IndexEntry {
    fn from(post: &Post) -> Self {
        IndexEntry {
            title: post.title.clone(),
            url: post.url.clone(),
            date: post.date,
        }
    }
}

/// Mapping from each tag to the posts carrying it.
///
/// Tags iterate in the order they first appear in the input; posts under a
/// tag keep their relative input order. Every tag has at least one entry.
/// Entries are projections of posts (title, url, date); the post's own tag
/// list is not carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    groups: Vec<(Tag, Vec<IndexEntry>)>,
    positions: HashMap<Tag, usize>,
}

/// Build the tag index for an ordered post sequence.
///
/// # Examples
///
/// ```
/// use tagdex::domain::{build_tag_index, Post, Tag};
///
/// let posts = vec![
///     Post::new("A", "/a", ["ruby", "rails"]),
///     Post::new("B", "/b", ["ruby"]),
///     Post::new("C", "/c", Vec::<String>::new()),
/// ];
///
/// let index = build_tag_index(&posts);
/// let ruby: Vec<&str> = index
///     .get(&Tag::new("ruby"))
///     .unwrap()
///     .iter()
///     .map(|e| e.title.as_str())
///     .collect();
/// assert_eq!(ruby, vec!["A", "B"]);
/// assert_eq!(index.get(&Tag::new("rails")).unwrap().len(), 1);
/// assert_eq!(index.len(), 2);
/// ```
pub fn build_tag_index(posts: &[Post]) -> TagIndex {
    let mut positions: HashMap<Tag, usize> = HashMap::new();
    let mut groups: Vec<(Tag, Vec<IndexEntry>)> = Vec::new();

    for post in posts {
        let mut seen: Vec<&Tag> = Vec::with_capacity(post.tags.len());
        for tag in &post.tags {
            // Post fields are public, so a hand-built post may repeat a tag.
            if seen.contains(&tag) {
                continue;
            }
            seen.push(tag);

            let slot = match positions.get(tag) {
                Some(&slot) => slot,
                None => {
                    groups.push((tag.clone(), Vec::new()));
                    positions.insert(tag.clone(), groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[slot].1.push(IndexEntry::from(post));
        }
    }

    TagIndex { groups, positions }
}

impl TagIndex {
    /// Posts carrying `tag`, in input order
    pub fn get(&self, tag: &Tag) -> Option<&[IndexEntry]> {
        self.positions
            .get(tag)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// All tags, in first-seen order
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.groups.iter().map(|(tag, _)| tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &[IndexEntry])> {
        self.groups
            .iter()
            .map(|(tag, entries)| (tag, entries.as_slice()))
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Tags with their post counts, in first-seen order
    pub fn counts(&self) -> Vec<(Tag, usize)> {
        self.groups
            .iter()
            .map(|(tag, entries)| (tag.clone(), entries.len()))
            .collect()
    }

    /// Reorder tag sections. Post order within each tag is untouched.
    pub fn sorted(mut self, order: TagOrder) -> Self {
        match order {
            TagOrder::FirstSeen => {}
            TagOrder::Alphabetical => self.groups.sort_by(|a, b| a.0.cmp(&b.0)),
            TagOrder::Frequency => self
                .groups
                .sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0))),
        }
        self.positions = self
            .groups
            .iter()
            .enumerate()
            .map(|(slot, (tag, _))| (tag.clone(), slot))
            .collect();
        self
    }
}

impl Serialize for TagIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (tag, entries) in &self.groups {
            map.serialize_entry(tag.as_str(), entries)?;
        }
        map.end()
    }
}
