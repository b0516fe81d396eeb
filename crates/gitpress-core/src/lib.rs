//! gitpress-core - Core types and commit construction for gitpress.

pub mod commit;
pub mod error;
pub mod metadata;
pub mod request;
pub mod schema;
pub mod types;

pub use commit::{CommitBuilder, CreateCommitOnBranchInput};
pub use error::Error;
pub use metadata::{MetadataIndex, MetadataRecord, content_hash};
pub use request::UpsertPageRequest;
pub use schema::{CustomFields, DocumentSchema, document_schema};
pub use types::{AssetKind, ContentLocation, PendingFile, RepoTarget, Slug, SlugState};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
