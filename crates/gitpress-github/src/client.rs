//! GitHub GraphQL HTTP client.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::{debug, instrument, trace};

use gitpress_core::commit::CreateCommitOnBranchInput;
use gitpress_core::error::{ApiError, AuthError, Error};
use gitpress_core::types::RepoTarget;
use gitpress_core::Result;

use crate::queries::{
    CREATE_COMMIT, CreateCommitData, CreateCommitPayload, METADATA_DOCUMENT, MetadataDocument,
};

/// GitHub's public GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// One GraphQL response envelope.
#[derive(Debug, serde::Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, serde::Deserialize)]
struct GraphqlError {
    message: String,
}

/// HTTP client for GitHub GraphQL calls.
///
/// Tokens are supplied per call, never stored: the API layer creates
/// one client and forwards each request's session token.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubClient {
    /// Create a client for the public GitHub GraphQL endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a client for a custom endpoint (GitHub Enterprise, test
    /// servers).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint this client is configured for.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one commit mutation. Any GraphQL-layer failure (including a
    /// stale-oid rejection) surfaces as an error; nothing is retried.
    #[instrument(skip(self, input, token))]
    pub async fn create_commit_on_branch(
        &self,
        input: &CreateCommitOnBranchInput,
        token: &str,
    ) -> Result<CreateCommitPayload> {
        debug!(
            repo = %input.branch.repository_name_with_owner,
            branch = %input.branch.branch_name,
            "creating commit via GraphQL"
        );

        let data: CreateCommitData = self
            .graphql(CREATE_COMMIT, &json!({ "input": input }), token)
            .await?;

        data.create_commit_on_branch.ok_or_else(|| {
            Error::Api(ApiError::new(
                200,
                vec!["createCommitOnBranch returned no payload".to_string()],
            ))
        })
    }

    /// Fetch the metadata index file as a blob, plus the branch head
    /// oid. A missing file resolves to a document with no blob, not an
    /// error.
    #[instrument(skip(self, token))]
    pub async fn metadata_document(
        &self,
        target: &RepoTarget,
        path: &str,
        token: &str,
    ) -> Result<MetadataDocument> {
        debug!(repo = %target, path, "fetching metadata file via GraphQL");

        let variables = json!({
            "owner": target.owner,
            "name": target.repo,
            "filePath": format!("{}:{}", target.branch, path),
            "branch": target.branch,
        });

        self.graphql(METADATA_DOCUMENT, &variables, token).await
    }

    /// Execute one GraphQL document and unwrap the envelope.
    async fn graphql<V, D>(&self, query: &str, variables: &V, token: &str) -> Result<D>
    where
        V: Serialize + std::fmt::Debug,
        D: DeserializeOwned,
    {
        trace!(?variables, "GraphQL variables");

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.auth_headers(token))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        trace!(status = %status, "GraphQL response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Auth(AuthError::TokenRejected {
                message: format!("HTTP {}", status.as_u16()),
            }));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::new(status.as_u16(), vec![body])));
        }

        let envelope: GraphqlResponse<D> = response.json().await?;

        if !envelope.errors.is_empty() {
            let messages = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::Api(ApiError::new(status.as_u16(), messages)));
        }

        envelope.data.ok_or_else(|| {
            Error::Api(ApiError::new(
                status.as_u16(),
                vec!["response contained neither data nor errors".to_string()],
            ))
        })
    }

    /// Headers GitHub requires on every GraphQL call.
    fn auth_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gitpress/", env!("CARGO_PKG_VERSION"))),
        );
        headers
    }
}
