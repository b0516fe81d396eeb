//! gitpress-client - Upsert orchestration for gitpress.
//!
//! Everything here runs before the network call to the pages API:
//! pending assets are resolved to permanent paths, the document body is
//! rewritten, and the metadata index is reconciled, all locally.

mod api;
pub mod files;
pub mod metadata;

pub use api::{ApiClient, PageEdit, UpsertResponse};
pub use files::{RewrittenContent, handle_files, sanitize_filename};
pub use metadata::save_metadata;
