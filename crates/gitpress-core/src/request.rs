//! The page-upsert wire request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{ContentLocation, PendingFile, RepoTarget, Slug, SlugState};

/// Body of `POST /api/gitpress/pages`.
///
/// `oid` must match the repository's current branch head or the commit
/// mutation is rejected upstream (optimistic concurrency).
/// `original_content` carries the document body with asset references
/// already rewritten to their permanent paths; `replace_files` carries
/// both the asset payloads (pre-encoded base64) and the updated
/// metadata index, keyed by committed path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPageRequest {
    /// Document body to commit.
    pub original_content: String,
    /// Base tree oid the commit must apply on top of.
    pub oid: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo_slug: String,
    /// Branch to commit to.
    pub repo_branch: String,
    /// Optional path prefix inside a monorepo.
    #[serde(default)]
    pub monorepo_path: Option<String>,
    /// Root directory of the managed content tree.
    pub content_path: String,
    /// Collection the document belongs to.
    pub collection: String,
    /// Current identity of the document (`new` when not yet created).
    pub slug: SlugState,
    /// Slug to save the document under.
    pub new_slug: Slug,
    /// Pending uploads; already folded into `replace_files` by the
    /// orchestrator, carried for observability.
    #[serde(default)]
    pub files: Vec<PendingFile>,
    /// Extra files to commit, keyed by path, contents base64-encoded.
    #[serde(default)]
    pub replace_files: BTreeMap<String, String>,
}

impl UpsertPageRequest {
    /// The repository and branch this edit targets.
    pub fn repo_target(&self) -> RepoTarget {
        RepoTarget::new(&self.owner, &self.repo_slug, &self.repo_branch)
    }

    /// Where the document lives inside the repository.
    pub fn location(&self) -> ContentLocation {
        ContentLocation::new(
            self.monorepo_path.clone(),
            &self.content_path,
            &self.collection,
        )
    }
}
