//! gitpress-github - GitHub GraphQL collaborator for gitpress.

mod client;
pub mod queries;

pub use client::{DEFAULT_ENDPOINT, GithubClient};
pub use queries::{CreateCommitPayload, GitObject, MetadataDocument, hash_from_url};
