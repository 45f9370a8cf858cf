//! Post content store
//!
//! Reads Markdown post sources from the posts directory and turns their front
//! matter into [`Post`]s, ordered newest first.

use crate::domain::{read_front_matter, Post, PostDraft, TagPolicy, ValidationMode};
use crate::error::{Result, TagdexError};
use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Jekyll-style post filename stem: `YYYY-MM-DD-slug`
fn dated_stem_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)$").unwrap())
}

/// A post source that was left out of the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPost {
    pub source: String,
    pub reason: String,
}

/// Result of loading posts from a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedPosts {
    /// Valid posts, newest first
    pub posts: Vec<Post>,
    /// Malformed sources skipped in lenient mode
    pub skipped: Vec<SkippedPost>,
    /// Sources with `published: false`
    pub unpublished: usize,
}

/// Anything that can supply the ordered post sequence
pub trait PostSource {
    fn load_posts(&self, policy: &TagPolicy, mode: ValidationMode) -> Result<LoadedPosts>;
}

/// Posts read from Markdown files under a directory
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    posts_dir: PathBuf,
    base_url: String,
}

/// What a filename says about a post
#[derive(Debug, Clone, PartialEq, Eq)]
struct FilenameInfo {
    date: Option<NaiveDate>,
    slug: String,
}

fn is_post_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("markdown")
    )
}

fn filename_info(path: &Path) -> Option<FilenameInfo> {
    let stem = path.file_stem()?.to_str()?;

    if let Some(caps) = dated_stem_regex().captures(stem) {
        let date_str = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
        if let Ok(date) = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
            return Some(FilenameInfo {
                date: Some(date),
                slug: caps[4].to_string(),
            });
        }
    }

    Some(FilenameInfo {
        date: None,
        slug: stem.to_string(),
    })
}

fn normalize_relative_path(path: &Path) -> String {
    path.iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl FileSystemStore {
    pub fn new(posts_dir: PathBuf, base_url: impl Into<String>) -> Self {
        FileSystemStore {
            posts_dir,
            base_url: base_url.into(),
        }
    }

    /// Prefix site-relative URLs with the configured base URL
    fn absolute_url(&self, url: &str) -> String {
        if url.contains("://") || self.base_url.is_empty() {
            return url.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        if url.starts_with('/') {
            format!("{}{}", base, url)
        } else {
            format!("{}/{}", base, url)
        }
    }

    /// URL for a post without an explicit `url`/`permalink`
    fn derived_url(info: &FilenameInfo) -> String {
        match info.date {
            Some(date) => format!("/{}/{}/", date.format("%Y/%m/%d"), info.slug),
            None => format!("/{}/", info.slug),
        }
    }

    fn collect_post_files(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.posts_dir)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || entry
                        .file_name()
                        .to_str()
                        .is_none_or(|name| !name.starts_with('.'))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_post_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files
    }

    /// Read one source into a draft. `Ok(None)` means unpublished.
    fn read_draft(&self, path: &Path, source: &str) -> Result<Option<PostDraft>> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| TagdexError::FrontMatter {
            source_path: source.to_string(),
            message: "not valid UTF-8".to_string(),
        })?;
        let fm = read_front_matter(&text, source)?;

        if !fm.published {
            return Ok(None);
        }

        let info = filename_info(path).unwrap_or(FilenameInfo {
            date: None,
            slug: source.to_string(),
        });

        let url = match fm.url {
            Some(url) => self.absolute_url(&url),
            None => self.absolute_url(&Self::derived_url(&info)),
        };

        Ok(Some(PostDraft {
            title: fm.title,
            url: Some(url),
            tags: fm.tags,
            date: fm.date.or(info.date),
            source: source.to_string(),
        }))
    }
}

impl PostSource for FileSystemStore {
    fn load_posts(&self, policy: &TagPolicy, mode: ValidationMode) -> Result<LoadedPosts> {
        let mut loaded = LoadedPosts::default();

        if !self.posts_dir.is_dir() {
            warn!(
                posts_dir = %self.posts_dir.display(),
                "posts directory does not exist, index will be empty"
            );
            return Ok(loaded);
        }

        let mut posts: Vec<(String, Post)> = Vec::new();

        for path in self.collect_post_files() {
            let source = path
                .strip_prefix(&self.posts_dir)
                .map(normalize_relative_path)
                .unwrap_or_else(|_| path.display().to_string());

            let outcome = self
                .read_draft(&path, &source)
                .and_then(|draft| draft.map(|d| d.validate(policy)).transpose());

            match outcome {
                Ok(Some(post)) => {
                    debug!(source = %source, tags = post.tags.len(), "loaded post");
                    posts.push((source, post));
                }
                Ok(None) => {
                    debug!(source = %source, "skipping unpublished post");
                    loaded.unpublished += 1;
                }
                Err(e) if mode == ValidationMode::Lenient && is_content_error(&e) => {
                    warn!(source = %source, error = %e, "skipping malformed post");
                    loaded.skipped.push(SkippedPost {
                        source,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        // Newest first, undated last, ties by source path
        posts.sort_by(|(sa, a), (sb, b)| match (a.date, b.date) {
            (Some(da), Some(db)) => db.cmp(&da).then_with(|| sa.cmp(sb)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => sa.cmp(sb),
        });

        loaded.posts = posts.into_iter().map(|(_, post)| post).collect();
        Ok(loaded)
    }
}

/// Errors caused by a post's content rather than the environment
fn is_content_error(error: &TagdexError) -> bool {
    matches!(
        error,
        TagdexError::MissingField { .. } | TagdexError::FrontMatter { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn titles(loaded: &LoadedPosts) -> Vec<&str> {
        loaded.posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_filename_info_dated() {
        let info = filename_info(Path::new("2014-03-02-http-clients.md")).unwrap();
        assert_eq!(info.date, NaiveDate::from_ymd_opt(2014, 3, 2));
        assert_eq!(info.slug, "http-clients");
    }

    #[test]
    fn test_filename_info_undated() {
        let info = filename_info(Path::new("about.markdown")).unwrap();
        assert_eq!(info.date, None);
        assert_eq!(info.slug, "about");
    }

    #[test]
    fn test_filename_info_invalid_date_is_slug() {
        let info = filename_info(Path::new("2014-13-40-nope.md")).unwrap();
        assert_eq!(info.date, None);
        assert_eq!(info.slug, "2014-13-40-nope");
    }

    #[test]
    fn test_absolute_url() {
        let store = FileSystemStore::new(PathBuf::from("_posts"), "https://blog.example/");
        assert_eq!(store.absolute_url("/a/"), "https://blog.example/a/");
        assert_eq!(store.absolute_url("b/"), "https://blog.example/b/");
        assert_eq!(
            store.absolute_url("https://elsewhere.example/x"),
            "https://elsewhere.example/x"
        );

        let bare = FileSystemStore::new(PathBuf::from("_posts"), "");
        assert_eq!(bare.absolute_url("/a/"), "/a/");
    }

    #[test]
    fn test_loads_newest_first() {
        let temp = TempDir::new().unwrap();
        write_post(
            temp.path(),
            "2014-01-10-old.md",
            "---\ntitle: Old\ntags: [ruby]\n---\n",
        );
        write_post(
            temp.path(),
            "2015-06-01-new.md",
            "---\ntitle: New\ntags: [ruby]\n---\n",
        );
        write_post(temp.path(), "undated.md", "---\ntitle: Undated\n---\n");

        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Lenient)
            .unwrap();

        assert_eq!(titles(&loaded), vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn test_front_matter_date_overrides_filename() {
        let temp = TempDir::new().unwrap();
        write_post(
            temp.path(),
            "2014-01-10-a.md",
            "---\ntitle: A\ndate: 2016-02-02\n---\n",
        );
        write_post(temp.path(), "2015-01-10-b.md", "---\ntitle: B\n---\n");

        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Lenient)
            .unwrap();

        assert_eq!(titles(&loaded), vec!["A", "B"]);
        assert_eq!(loaded.posts[0].date, NaiveDate::from_ymd_opt(2016, 2, 2));
        // URL still comes from the filename
        assert_eq!(loaded.posts[0].url, "/2014/01/10/a/");
    }

    #[test]
    fn test_permalink_used_as_url() {
        let temp = TempDir::new().unwrap();
        write_post(
            temp.path(),
            "2014-01-10-a.md",
            "---\ntitle: A\npermalink: /custom/\n---\n",
        );

        let store = FileSystemStore::new(temp.path().to_path_buf(), "/blog");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Strict)
            .unwrap();

        assert_eq!(loaded.posts[0].url, "/blog/custom/");
    }

    #[test]
    fn test_lenient_skips_malformed() {
        let temp = TempDir::new().unwrap();
        write_post(temp.path(), "2014-01-10-a.md", "---\ntags: [ruby]\n---\n");
        write_post(temp.path(), "2014-01-11-b.md", "---\ntitle: B\n");
        write_post(temp.path(), "2014-01-12-c.md", "---\ntitle: C\n---\n");

        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Lenient)
            .unwrap();

        assert_eq!(titles(&loaded), vec!["C"]);
        assert_eq!(loaded.skipped.len(), 2);
        assert!(loaded
            .skipped
            .iter()
            .any(|s| s.source == "2014-01-10-a.md" && s.reason.contains("'title'")));
    }

    #[test]
    fn test_lenient_skips_non_utf8_post() {
        let temp = TempDir::new().unwrap();
        let mut bytes = b"---\ntitle: A\n---\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        fs::write(temp.path().join("2014-01-10-a.md"), bytes).unwrap();
        write_post(temp.path(), "2014-01-11-b.md", "---\ntitle: B\n---\n");

        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Lenient)
            .unwrap();

        assert_eq!(titles(&loaded), vec!["B"]);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].source, "2014-01-10-a.md");
        assert!(loaded.skipped[0].reason.contains("not valid UTF-8"));

        let err = store
            .load_posts(&TagPolicy::default(), ValidationMode::Strict)
            .unwrap_err();
        assert!(matches!(err, TagdexError::FrontMatter { .. }));
    }

    #[test]
    fn test_strict_fails_on_malformed() {
        let temp = TempDir::new().unwrap();
        write_post(temp.path(), "2014-01-10-a.md", "---\ntags: [ruby]\n---\n");

        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let err = store
            .load_posts(&TagPolicy::default(), ValidationMode::Strict)
            .unwrap_err();

        assert!(matches!(err, TagdexError::MissingField { field: "title", .. }));
    }

    #[test]
    fn test_unpublished_excluded() {
        let temp = TempDir::new().unwrap();
        write_post(
            temp.path(),
            "2014-01-10-a.md",
            "---\ntitle: A\npublished: false\n---\n",
        );

        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Strict)
            .unwrap();

        assert!(loaded.posts.is_empty());
        assert_eq!(loaded.unpublished, 1);
    }

    #[test]
    fn test_recurses_and_skips_hidden_and_non_markdown() {
        let temp = TempDir::new().unwrap();
        write_post(temp.path(), "ruby/2014-01-10-a.md", "---\ntitle: A\n---\n");
        write_post(temp.path(), ".drafts/2014-01-11-b.md", "---\ntitle: B\n---\n");
        write_post(temp.path(), "notes.txt", "---\ntitle: T\n---\n");

        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Strict)
            .unwrap();

        assert_eq!(titles(&loaded), vec!["A"]);
    }

    #[test]
    fn test_missing_posts_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp.path().join("_posts"), "");
        let loaded = store
            .load_posts(&TagPolicy::default(), ValidationMode::Strict)
            .unwrap();
        assert_eq!(loaded, LoadedPosts::default());
    }

    #[test]
    fn test_policy_applied_to_tags() {
        let temp = TempDir::new().unwrap();
        write_post(
            temp.path(),
            "2014-01-10-a.md",
            "---\ntitle: A\ntags: [Ruby, ruby, ' Rails ']\n---\n",
        );

        let policy = TagPolicy {
            trim: true,
            fold_case: true,
        };
        let store = FileSystemStore::new(temp.path().to_path_buf(), "");
        let loaded = store.load_posts(&policy, ValidationMode::Strict).unwrap();

        assert_eq!(loaded.posts[0].tags, vec![Tag::new("ruby"), Tag::new("rails")]);
    }
}
