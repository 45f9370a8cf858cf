//! tagdex - Tag index builder for static blogs
//!
//! Reads front-matter-annotated Markdown posts, groups them by tag and renders
//! the resulting index as JSON, Markdown or HTML.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;

pub use domain::{build_tag_index, Post, Tag, TagIndex};
pub use error::TagdexError;
