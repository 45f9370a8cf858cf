//! Initialize site use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemSite, SiteRepository};
use std::fs;
use std::path::Path;

pub struct InitService;

impl InitService {
    /// Initialize a tagdex site at `path`, writing a default config.
    ///
    /// Creates `path` if needed. The posts directory itself is not created.
    pub fn execute(path: &Path, posts_dir: &str) -> Result<Config> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let site = FileSystemSite::new(path.to_path_buf());
        site.initialize()?;

        let config = Config::new(posts_dir);
        site.save_config(&config)?;

        Ok(config)
    }
}
