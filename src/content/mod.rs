//! Content module - records, the immutable content store, and Markdown sources

mod frontmatter;
pub mod loader;
mod markdown;
mod record;
mod store;

pub use frontmatter::{format_display_date, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use record::{PostRecord, ProjectRecord, RecordKind};
pub use store::{is_valid_slug, ContentError, ContentStore};
