//! Configuration management

use crate::domain::{TagOrder, TagPolicy, ValidationMode};
use crate::error::{Result, TagdexError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the directory holding site configuration
pub const CONFIG_DIR: &str = ".tagdex";

/// Default directory for post sources, relative to the site root
pub const DEFAULT_POSTS_DIR: &str = "_posts";

fn default_posts_dir() -> String {
    DEFAULT_POSTS_DIR.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding post sources, relative to the site root
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,

    /// Prefix for derived and relative post URLs
    #[serde(default)]
    pub base_url: String,

    /// Fail the build on malformed posts instead of skipping them
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub fold_case: bool,

    #[serde(default = "default_true")]
    pub trim: bool,

    /// Tag section order in rendered output
    #[serde(default)]
    pub order: TagOrder,

    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(posts_dir: impl Into<String>) -> Self {
        Config {
            posts_dir: posts_dir.into(),
            base_url: String::new(),
            strict: false,
            fold_case: false,
            trim: true,
            order: TagOrder::default(),
            created: Utc::now(),
        }
    }

    /// Load config from .tagdex/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagdexError::NotTagdexSite(path.to_path_buf())
            } else {
                TagdexError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| TagdexError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .tagdex/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let config_dir = path.join(CONFIG_DIR);
        let config_path = config_dir.join("config.toml");

        if !config_dir.exists() {
            fs::create_dir(&config_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TagdexError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Tag canonicalization rules for this site
    pub fn tag_policy(&self) -> TagPolicy {
        TagPolicy {
            trim: self.trim,
            fold_case: self.fold_case,
        }
    }

    pub fn validation_mode(&self) -> ValidationMode {
        if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }
}
