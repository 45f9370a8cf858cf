//! Domain layer - Posts, tags and the tag index

pub mod front_matter;
pub mod index;
pub mod post;
pub mod render;
pub mod tag;

pub use front_matter::{read_front_matter, split_front_matter, FrontMatter, FrontMatterKind};
pub use index::{build_tag_index, IndexEntry, TagIndex};
pub use post::{Post, PostDraft, ValidationMode};
pub use render::{render_html, render_json, render_markdown, IndexFormat};
pub use tag::{Tag, TagOrder, TagPolicy};
