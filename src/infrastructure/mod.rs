//! Infrastructure layer - Site configuration and post storage

pub mod config;
pub mod repository;
pub mod store;

pub use config::Config;
pub use repository::{FileSystemSite, SiteRepository};
pub use store::{FileSystemStore, LoadedPosts, PostSource, SkippedPost};
