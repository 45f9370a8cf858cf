//! Error types for tagdex

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagdex
#[derive(Debug, Error)]
pub enum TagdexError {
    #[error("Not a tagdex site: {0}")]
    NotTagdexSite(PathBuf),

    #[error("Post {source_path} is missing required field '{field}'")]
    MissingField {
        field: &'static str,
        source_path: String,
    },

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Front matter error in {source_path}: {message}")]
    FrontMatter {
        source_path: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TagdexError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagdexError::NotTagdexSite(_) => 2,
            TagdexError::MissingField { .. } => 3,
            TagdexError::TagNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagdexError::NotTagdexSite(path) => {
                format!(
                    "Not a tagdex site: {}\n\n\
                    Suggestions:\n\
                    • Run 'tagdex init' in your blog's root directory\n\
                    • Navigate to an existing tagdex site\n\
                    • Set TAGDEX_ROOT environment variable to your site path",
                    path.display()
                )
            }
            TagdexError::MissingField { field, source_path } => {
                format!(
                    "Post {} is missing required field '{}'\n\n\
                    Suggestions:\n\
                    • Add '{}' to the post's front matter\n\
                    • Build without --strict to skip malformed posts\n\
                    • Disable strict mode: tagdex config strict false",
                    source_path, field, field
                )
            }
            TagdexError::TagNotFound(tag) => {
                format!(
                    "No posts found for tag: '{}'\n\n\
                    Suggestions:\n\
                    • Check your tag spelling (tags match exactly, not by substring)\n\
                    • Use 'tagdex tags' to see available tags\n\
                    • Enable case folding: tagdex config fold_case true",
                    tag
                )
            }
            TagdexError::Config(msg) => {
                if msg.contains("Invalid tag order") {
                    format!(
                        "{}\n\n\
                        Example: tagdex config order alphabetical",
                        msg
                    )
                } else if msg.contains("Invalid format") {
                    format!(
                        "{}\n\n\
                        Example: tagdex build --format markdown",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagdexError
pub type Result<T> = std::result::Result<T, TagdexError>;
