//! Repository and content-tree locations.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AssetKind, Slug};

/// The repository and branch a commit targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTarget {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch to commit to.
    pub branch: String,
}

impl RepoTarget {
    /// Create a new repository target.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// The `owner/repo` form used by the commit mutation.
    pub fn name_with_owner(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Where a collection's documents live inside the repository.
///
/// `monorepo_path` is an optional prefix for content repositories that
/// are a subdirectory of a larger repository; it applies to committed
/// file paths but never to the public URL of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLocation {
    /// Optional path prefix inside a monorepo.
    pub monorepo_path: Option<String>,
    /// Root directory of the managed content tree.
    pub content_path: String,
    /// Collection (subdirectory) this document belongs to.
    pub collection: String,
}

impl ContentLocation {
    /// Create a new content location.
    pub fn new(
        monorepo_path: Option<String>,
        content_path: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            monorepo_path: monorepo_path.filter(|p| !p.is_empty()),
            content_path: content_path.into(),
            collection: collection.into(),
        }
    }

    fn prefix(&self) -> String {
        match &self.monorepo_path {
            Some(path) => format!("{}/", path),
            None => String::new(),
        }
    }

    /// Committed path of a document: `{prefix}{content}/{collection}/{slug}.md`.
    pub fn document_path(&self, slug: &Slug) -> String {
        format!(
            "{}{}/{}/{}.md",
            self.prefix(),
            self.content_path,
            self.collection,
            slug
        )
    }

    /// Path of a document as recorded in the metadata index.
    ///
    /// The index is consumed relative to the content repository, so the
    /// monorepo prefix is deliberately absent here.
    pub fn record_path(&self, slug: &Slug) -> String {
        format!("{}/{}/{}.md", self.content_path, self.collection, slug)
    }

    /// Committed path of the metadata index file.
    pub fn metadata_path(&self) -> String {
        format!("{}{}/metadata.json", self.prefix(), self.content_path)
    }

    /// Committed path of an uploaded asset.
    pub fn asset_path(&self, kind: AssetKind, filename: &str) -> String {
        format!("{}public/{}{}", self.prefix(), kind.upload_dir(), filename)
    }

    /// Public URL path of an asset, as referenced from document bodies.
    pub fn asset_url(kind: AssetKind, filename: &str) -> String {
        format!("/{}{}", kind.upload_dir(), filename)
    }
}
