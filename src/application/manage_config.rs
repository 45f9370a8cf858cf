//! Config management use case

use crate::domain::{TagOrder, ValidationMode};
use crate::error::{Result, TagdexError};
use crate::infrastructure::{FileSystemSite, SiteRepository};
use std::str::FromStr;

const VALID_KEYS: &str = "posts_dir, base_url, strict, fold_case, trim, order, created";

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TagdexError::Config(format!(
            "Invalid value for '{}': '{}'. Use true or false",
            key, value
        ))),
    }
}

/// Service for managing site configuration
pub struct ConfigService {
    site: FileSystemSite,
}

impl ConfigService {
    pub fn new(site: FileSystemSite) -> Self {
        ConfigService { site }
    }

    /// All config values as key/value pairs, in display order
    pub fn list(&self) -> Result<Vec<(&'static str, String)>> {
        let config = self.site.load_config()?;
        Ok(vec![
            ("posts_dir", config.posts_dir.clone()),
            ("base_url", config.base_url.clone()),
            ("strict", config.strict.to_string()),
            ("fold_case", config.fold_case.to_string()),
            ("trim", config.trim.to_string()),
            ("order", config.order.to_string()),
            ("created", config.created.to_rfc3339()),
        ])
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        self.list()?
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| {
                TagdexError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                ))
            })
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.site.load_config()?;

        match key {
            "posts_dir" => {
                if value.trim().is_empty() {
                    return Err(TagdexError::Config(
                        "posts_dir cannot be empty".to_string(),
                    ));
                }
                config.posts_dir = value.to_string();
            }
            "base_url" => config.base_url = value.to_string(),
            "strict" => {
                let mode = ValidationMode::from_str(value).map_err(TagdexError::Config)?;
                config.strict = mode == ValidationMode::Strict;
            }
            "fold_case" => config.fold_case = parse_bool(key, value)?,
            "trim" => config.trim = parse_bool(key, value)?,
            "order" => config.order = TagOrder::from_str(value).map_err(TagdexError::Config)?,
            "created" => {
                return Err(TagdexError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(TagdexError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.site.save_config(&config)?;
        Ok(())
    }
}
