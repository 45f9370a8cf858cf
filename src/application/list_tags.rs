//! List tags use case

use crate::application::build_index::{collect_index, site_store};
use crate::domain::{Tag, TagOrder};
use crate::error::Result;
use crate::infrastructure::{FileSystemSite, SiteRepository};

/// Service for listing all tags with their post counts.
pub struct ListTagsService {
    site: FileSystemSite,
}

impl ListTagsService {
    pub fn new(site: FileSystemSite) -> Self {
        Self { site }
    }

    /// Execute tag listing, ordered by `order` or the configured order.
    pub fn execute(&self, order: Option<TagOrder>) -> Result<Vec<(Tag, usize)>> {
        let config = self.site.load_config()?;
        let store = site_store(&self.site, &config);
        let (index, _) = collect_index(&store, &config.tag_policy(), config.validation_mode())?;

        Ok(index.sorted(order.unwrap_or(config.order)).counts())
    }
}
