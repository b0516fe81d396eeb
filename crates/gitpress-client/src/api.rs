//! The API client driving a page upsert end to end.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use gitpress_core::Result;
use gitpress_core::commit::CreateCommitOnBranchInput;
use gitpress_core::error::{ApiError, AuthError, Error};
use gitpress_core::request::UpsertPageRequest;
use gitpress_core::types::{ContentLocation, PendingFile, RepoTarget, Slug, SlugState};
use gitpress_github::MetadataDocument;

use crate::files::handle_files;
use crate::metadata::save_metadata;

/// A page edit before orchestration.
#[derive(Debug, Clone)]
pub struct PageEdit {
    /// Repository and branch the edit targets.
    pub target: RepoTarget,
    /// Where the document lives inside the repository.
    pub location: ContentLocation,
    /// Current identity of the document.
    pub slug: SlugState,
    /// Slug to save the document under.
    pub new_slug: Slug,
    /// Base tree oid read when the edit started.
    pub oid: String,
    /// Document body, still carrying placeholder asset references.
    pub content: String,
    /// Front-matter fields of the document.
    pub front_matter: Map<String, Value>,
    /// Binary assets uploaded during the edit.
    pub files: Vec<PendingFile>,
    /// The previously fetched metadata index document, if any.
    pub metadata: Option<MetadataDocument>,
}

/// Response body of a successful upsert: the commit-mutation input as
/// the server sent it upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertResponse {
    /// The echoed mutation input.
    pub input: CreateCommitOnBranchInput,
}

/// HTTP client for the gitpress pages API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL this client posts to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prepare an edit locally and POST it as one upsert request.
    ///
    /// Asset resolution runs first so the metadata content hash covers
    /// the final, rewritten body. The request is sent exactly once; an
    /// upstream rejection (stale oid included) surfaces as an error
    /// with no retry.
    #[instrument(skip(self, edit), fields(slug = %edit.new_slug))]
    pub async fn upsert_page(&self, edit: PageEdit) -> Result<UpsertResponse> {
        let rewritten = handle_files(&edit.content, &edit.files, &edit.location);

        let old_slug = edit.slug.rename_from(&edit.new_slug);
        let mut replace_files = save_metadata(
            edit.metadata.as_ref(),
            &edit.location,
            old_slug,
            &edit.new_slug,
            &edit.front_matter,
            &rewritten.content,
        )?;
        replace_files.extend(rewritten.assets);

        let body = UpsertPageRequest {
            original_content: rewritten.content,
            oid: edit.oid,
            owner: edit.target.owner,
            repo_slug: edit.target.repo,
            repo_branch: edit.target.branch,
            monorepo_path: edit.location.monorepo_path.clone(),
            content_path: edit.location.content_path.clone(),
            collection: edit.location.collection.clone(),
            slug: edit.slug,
            new_slug: edit.new_slug,
            files: edit.files,
            replace_files,
        };

        let url = format!("{}/api/gitpress/pages", self.base_url);
        debug!(%url, "posting page upsert");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Auth(AuthError::MissingToken));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::new(status.as_u16(), vec![text])));
        }

        Ok(response.json().await?)
    }
}
