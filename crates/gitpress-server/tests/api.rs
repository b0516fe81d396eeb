//! End-to-end tests for the API router.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`;
//! the GitHub GraphQL endpoint is a wiremock server.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitpress_github::GithubClient;
use gitpress_server::{AppState, LoginSession, SessionStore, router};

/// Session store answering with a fixed token (or nothing).
struct FixedSession(Option<&'static str>);

#[async_trait]
impl SessionStore for FixedSession {
    async fn login_session(&self, _headers: &HeaderMap) -> Option<LoginSession> {
        self.0.map(|token| LoginSession {
            access_token: token.to_string(),
        })
    }
}

fn app(github_uri: &str, session: Option<&'static str>) -> axum::Router {
    let mut state = AppState::new(GithubClient::with_endpoint(format!(
        "{github_uri}/graphql"
    )));
    state.sessions = Arc::new(FixedSession(session));
    router(state)
}

fn upsert_body(slug: &str, new_slug: &str) -> Value {
    json!({
        "originalContent": "# Hello",
        "oid": "abc123",
        "owner": "acme",
        "repoSlug": "site",
        "repoBranch": "main",
        "monorepoPath": "",
        "contentPath": "content",
        "collection": "posts",
        "slug": slug,
        "newSlug": new_slug,
        "files": [],
        "replaceFiles": {}
    })
}

fn post_pages(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/gitpress/pages")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn mock_github() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "createCommitOnBranch": { "commit": { "oid": "def456" } }
            }
        })))
        .mount(&server)
        .await;
    server
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn unauthenticated_post_is_401_with_empty_body() {
    let github = mock_github().await;
    let app = app(&github.uri(), None);

    let response = app.oneshot(post_pages(&upsert_body("new", "hello"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn non_post_is_405_with_empty_body() {
    let github = mock_github().await;
    let app = app(&github.uri(), Some("token"));

    let request = Request::builder()
        .method("GET")
        .uri("/api/gitpress/pages")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let github = mock_github().await;
    let app = app(&github.uri(), Some("token"));

    let request = Request::builder()
        .method("GET")
        .uri("/api/gitpress/posts")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_queues_one_replace_and_no_delete() {
    let github = mock_github().await;
    let app = app(&github.uri(), Some("token"));

    let response = app
        .oneshot(post_pages(&upsert_body("new", "my-post")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let input = &body_json(response).await["input"];
    let additions = input["fileChanges"]["additions"].as_array().unwrap();
    let deletions = input["fileChanges"]["deletions"].as_array().unwrap();

    assert_eq!(additions.len(), 1);
    assert!(deletions.is_empty());
    assert_eq!(additions[0]["path"], "content/posts/my-post.md");

    let contents = BASE64
        .decode(additions[0]["contents"].as_str().unwrap())
        .unwrap();
    assert_eq!(contents, b"# Hello");
    assert_eq!(input["expectedHeadOid"], "abc123");
    assert_eq!(input["message"]["headline"], "chore: Updates/Creates my-post");
}

#[tokio::test]
async fn rename_deletes_old_document() {
    let github = mock_github().await;
    let app = app(&github.uri(), Some("token"));

    let response = app
        .oneshot(post_pages(&upsert_body("hello", "world")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let input = &body_json(response).await["input"];
    let additions = input["fileChanges"]["additions"].as_array().unwrap();
    let deletions = input["fileChanges"]["deletions"].as_array().unwrap();

    assert_eq!(deletions.len(), 1);
    assert_eq!(deletions[0]["path"], "content/posts/hello.md");
    assert_eq!(additions.len(), 1);
    assert_eq!(additions[0]["path"], "content/posts/world.md");
    assert_eq!(
        input["message"]["headline"],
        "chore: Updates world formerly hello"
    );
}

#[tokio::test]
async fn same_slug_save_queues_no_delete() {
    let github = mock_github().await;
    let app = app(&github.uri(), Some("token"));

    let response = app
        .oneshot(post_pages(&upsert_body("hello", "hello")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let input = &body_json(response).await["input"];
    assert!(input["fileChanges"]["deletions"].as_array().unwrap().is_empty());
    assert_eq!(input["message"]["headline"], "chore: Updates/Creates hello");
}

#[tokio::test]
async fn replace_files_pass_through_pre_encoded() {
    let github = mock_github().await;
    let app = app(&github.uri(), Some("token"));

    let mut body = upsert_body("new", "hello");
    body["replaceFiles"] = json!({
        "content/metadata.json": BASE64.encode("{}"),
        "public/images/cat-1234.png": "AQID"
    });

    let response = app.oneshot(post_pages(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let input = &body_json(response).await["input"];
    let additions = input["fileChanges"]["additions"].as_array().unwrap();

    // Document first, then replaceFiles in map order, untouched.
    assert_eq!(additions.len(), 3);
    assert_eq!(additions[0]["path"], "content/posts/hello.md");
    assert_eq!(additions[1]["path"], "content/metadata.json");
    assert_eq!(additions[2]["path"], "public/images/cat-1234.png");
    assert_eq!(additions[2]["contents"], "AQID");
}

#[tokio::test]
async fn upstream_rejection_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Expected branch to point to \"abc123\"" }]
        })))
        .mount(&server)
        .await;

    let app = app(&server.uri(), Some("token"));
    let response = app.oneshot(post_pages(&upsert_body("new", "hello"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Expected branch"));
}

#[tokio::test]
async fn malformed_body_is_422() {
    let github = mock_github().await;
    let app = app(&github.uri(), Some("token"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/gitpress/pages")
        .header("content-type", "application/json")
        .body(Body::from("{\"slug\": \"BAD SLUG\"}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
