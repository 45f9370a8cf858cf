//! Tag index build use case
//!
//! Loads posts from the site's content store, aggregates them by tag and
//! renders the result.

use crate::domain::{
    build_tag_index, render_html, render_json, render_markdown, IndexFormat, TagIndex, TagOrder,
    TagPolicy, ValidationMode,
};
use crate::error::Result;
use crate::infrastructure::{
    Config, FileSystemSite, FileSystemStore, LoadedPosts, PostSource, SiteRepository, SkippedPost,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for a build
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub format: IndexFormat,

    /// Output file (None = return the rendered index for stdout)
    pub output: Option<PathBuf>,

    /// Tag order override (None = config value)
    pub order: Option<TagOrder>,

    /// Force strict validation regardless of config
    pub strict: bool,
}

/// Outcome of a build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub index: TagIndex,
    pub rendered: String,
    /// Where the index was written, if an output file was requested
    pub output_path: Option<PathBuf>,
    pub post_count: usize,
    pub skipped: Vec<SkippedPost>,
}

/// Load posts from `source` and aggregate them.
///
/// The index keeps first-seen tag order; callers reorder for display.
pub fn collect_index<S: PostSource>(
    source: &S,
    policy: &TagPolicy,
    mode: ValidationMode,
) -> Result<(TagIndex, LoadedPosts)> {
    let loaded = source.load_posts(policy, mode)?;
    let index = build_tag_index(&loaded.posts);

    debug!(
        posts = loaded.posts.len(),
        tags = index.len(),
        skipped = loaded.skipped.len(),
        "aggregated tag index"
    );

    Ok((index, loaded))
}

/// Render an index in the requested format
pub fn render(index: &TagIndex, format: IndexFormat) -> Result<String> {
    match format {
        IndexFormat::Json => Ok(render_json(index)?),
        IndexFormat::Markdown => Ok(render_markdown(index)),
        IndexFormat::Html => Ok(render_html(index)),
    }
}

/// Content store for a site's configuration
pub fn site_store(site: &FileSystemSite, config: &Config) -> FileSystemStore {
    FileSystemStore::new(site.posts_path(config), config.base_url.clone())
}

/// Service for building the tag index
pub struct BuildIndexService {
    site: FileSystemSite,
}

impl BuildIndexService {
    pub fn new(site: FileSystemSite) -> Self {
        BuildIndexService { site }
    }

    /// Execute the build
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The site config cannot be loaded
    /// - A post is malformed and validation is strict
    /// - File I/O fails
    pub fn execute(&self, options: BuildOptions) -> Result<BuildReport> {
        let config = self.site.load_config()?;

        let mode = if options.strict {
            ValidationMode::Strict
        } else {
            config.validation_mode()
        };

        let store = site_store(&self.site, &config);
        let (index, loaded) = collect_index(&store, &config.tag_policy(), mode)?;

        let index = index.sorted(options.order.unwrap_or(config.order));
        let rendered = render(&index, options.format)?;

        let output_path = match &options.output {
            Some(path) => Some(self.site.write_output(path, &rendered)?),
            None => None,
        };

        info!(
            posts = loaded.posts.len(),
            tags = index.len(),
            skipped = loaded.skipped.len(),
            unpublished = loaded.unpublished,
            format = %options.format,
            "built tag index"
        );

        Ok(BuildReport {
            index,
            rendered,
            output_path,
            post_count: loaded.posts.len(),
            skipped: loaded.skipped,
        })
    }
}
