//! Application layer - Use cases and orchestration

pub mod build_index;
pub mod init;
pub mod list_tags;
pub mod manage_config;
pub mod show_tag;

pub use build_index::{BuildIndexService, BuildOptions, BuildReport};
pub use init::InitService;
pub use list_tags::ListTagsService;
pub use manage_config::ConfigService;
pub use show_tag::ShowTagService;
