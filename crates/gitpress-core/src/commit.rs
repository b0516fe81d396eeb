//! Commit construction.
//!
//! A [`CommitBuilder`] accumulates file additions and deletions and
//! serializes them once into the input object of GitHub's
//! `createCommitOnBranch` mutation. The builder performs no I/O; the
//! mutation itself is atomic upstream, so there is no partial-commit
//! state to manage here.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::types::RepoTarget;

/// A file to add or replace in the commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAddition {
    /// Repository path of the file.
    pub path: String,
    /// Base64-encoded file contents.
    pub contents: String,
}

/// A file to delete in the commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDeletion {
    /// Repository path of the file.
    pub path: String,
}

/// The `fileChanges` block of the commit mutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChanges {
    /// Files to add or replace, in insertion order.
    pub additions: Vec<FileAddition>,
    /// Files to delete, in insertion order.
    pub deletions: Vec<FileDeletion>,
}

/// The `branch` block of the commit mutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittableBranch {
    /// `owner/repo` form of the target repository.
    pub repository_name_with_owner: String,
    /// Branch name.
    pub branch_name: String,
}

/// The `message` block of the commit mutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    /// First line of the commit message.
    pub headline: String,
}

/// Input object for the `createCommitOnBranch` mutation.
///
/// `expected_head_oid` is the optimistic-concurrency precondition: the
/// mutation is rejected upstream when the branch head moved since the
/// caller read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommitOnBranchInput {
    /// Target repository and branch.
    pub branch: CommittableBranch,
    /// Commit message.
    pub message: CommitMessage,
    /// File additions and deletions.
    pub file_changes: FileChanges,
    /// Base oid the commit must apply on top of.
    pub expected_head_oid: String,
}

/// Accumulates file operations for a single commit.
///
/// Operations are kept in insertion order; a later operation on the
/// same path wins only by construction order. [`CommitBuilder::create_input`]
/// consumes the builder, so the input can be produced exactly once.
#[derive(Debug, Clone)]
pub struct CommitBuilder {
    message: String,
    target: RepoTarget,
    oid: String,
    additions: Vec<FileAddition>,
    deletions: Vec<FileDeletion>,
}

impl CommitBuilder {
    /// Create a builder for one commit on the given branch.
    pub fn new(message: impl Into<String>, target: RepoTarget, oid: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            target,
            oid: oid.into(),
            additions: Vec::new(),
            deletions: Vec::new(),
        }
    }

    /// Queue an add/replace of `path`, base64-encoding `contents` for
    /// transport.
    pub fn replace_file(&mut self, path: impl Into<String>, contents: impl AsRef<[u8]>) {
        self.additions.push(FileAddition {
            path: path.into(),
            contents: BASE64.encode(contents.as_ref()),
        });
    }

    /// Queue an add/replace of `path` whose contents are already
    /// base64-encoded (asset payloads arrive pre-encoded from upload).
    pub fn replace_file_encoded(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.additions.push(FileAddition {
            path: path.into(),
            contents: contents.into(),
        });
    }

    /// Queue a deletion of `path`.
    pub fn remove_file(&mut self, path: impl Into<String>) {
        self.deletions.push(FileDeletion { path: path.into() });
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.additions.len() + self.deletions.len()
    }

    /// Whether no operations are queued.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }

    /// Consume the builder into the mutation input.
    pub fn create_input(self) -> CreateCommitOnBranchInput {
        CreateCommitOnBranchInput {
            branch: CommittableBranch {
                repository_name_with_owner: self.target.name_with_owner(),
                branch_name: self.target.branch,
            },
            message: CommitMessage {
                headline: self.message,
            },
            file_changes: FileChanges {
                additions: self.additions,
                deletions: self.deletions,
            },
            expected_head_oid: self.oid,
        }
    }
}
