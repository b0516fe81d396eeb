//! GraphQL documents and response shapes.

use serde::Deserialize;

/// Mutation creating one atomic commit on a branch.
pub const CREATE_COMMIT: &str = "\
mutation createCommit($input: CreateCommitOnBranchInput!) {
  createCommitOnBranch(input: $input) {
    commit {
      oid
    }
  }
}";

/// Query fetching a repository file as a blob, plus the branch head oid.
pub const METADATA_DOCUMENT: &str = "\
query metadataDocument($owner: String!, $name: String!, $filePath: String!, $branch: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: $filePath) {
      __typename
      ... on Blob {
        text
        commitUrl
      }
    }
    ref(qualifiedName: $branch) {
      target {
        oid
      }
    }
  }
}";

/// Data block of the commit mutation response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitData {
    /// Mutation payload; null when the mutation was rejected.
    pub create_commit_on_branch: Option<CreateCommitPayload>,
}

/// Payload of the commit mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommitPayload {
    /// The created commit.
    pub commit: Option<CommitRef>,
}

/// A reference to a created commit.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    /// Object id of the created commit.
    pub oid: String,
}

/// Data block of the metadata-file query response.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataDocument {
    /// Queried repository; null when it does not exist or is not
    /// visible to the token.
    pub repository: Option<RepositoryObject>,
}

/// Repository fields of the metadata-file query.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryObject {
    /// The object at the requested expression; null for a missing file.
    pub object: Option<GitObject>,
    /// The queried branch ref.
    #[serde(rename = "ref")]
    pub branch_ref: Option<BranchRef>,
}

/// A branch ref with its head target.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    /// Head commit of the branch.
    pub target: Option<CommitRef>,
}

/// A git object discriminated by GraphQL typename.
///
/// Only blobs carry content; trees, commits and anything a future
/// schema adds all land in `Other` and are treated as "no metadata
/// file".
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum GitObject {
    /// A file blob.
    Blob {
        /// UTF-8 text of the blob; null for binary blobs.
        text: Option<String>,
        /// URL of the commit that last touched the blob.
        #[serde(rename = "commitUrl")]
        commit_url: String,
    },
    /// Any non-blob object.
    #[serde(other)]
    Other,
}

impl MetadataDocument {
    /// The fetched blob, when the metadata file exists and resolved to
    /// one: `(text, commit_url)`. A null text reads as empty.
    pub fn blob(&self) -> Option<(&str, &str)> {
        match self.repository.as_ref()?.object.as_ref()? {
            GitObject::Blob { text, commit_url } => {
                Some((text.as_deref().unwrap_or_default(), commit_url))
            }
            GitObject::Other => None,
        }
    }

    /// Head oid of the queried branch, if resolved.
    pub fn head_oid(&self) -> Option<&str> {
        Some(
            self.repository
                .as_ref()?
                .branch_ref
                .as_ref()?
                .target
                .as_ref()?
                .oid
                .as_str(),
        )
    }
}

/// Extract the commit hash from a blob's commit URL (the trailing path
/// segment of e.g. `https://github.com/acme/site/commit/abc123`).
pub fn hash_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
