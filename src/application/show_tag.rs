//! Show the posts under one tag

use crate::application::build_index::{collect_index, site_store};
use crate::domain::IndexEntry;
use crate::error::{Result, TagdexError};
use crate::infrastructure::{FileSystemSite, SiteRepository};

/// Service for looking up a single tag's posts
pub struct ShowTagService {
    site: FileSystemSite,
}

impl ShowTagService {
    pub fn new(site: FileSystemSite) -> Self {
        Self { site }
    }

    /// Posts carrying `tag`, newest first.
    ///
    /// `tag` goes through the site's canonicalization rules, then matches
    /// exactly.
    pub fn execute(&self, tag: &str) -> Result<Vec<IndexEntry>> {
        let config = self.site.load_config()?;
        let policy = config.tag_policy();

        let wanted = policy
            .canonicalize(tag)
            .ok_or_else(|| TagdexError::TagNotFound(tag.to_string()))?;

        let store = site_store(&self.site, &config);
        let (index, _) = collect_index(&store, &policy, config.validation_mode())?;

        index
            .get(&wanted)
            .map(<[IndexEntry]>::to_vec)
            .ok_or_else(|| TagdexError::TagNotFound(tag.to_string()))
    }
}
