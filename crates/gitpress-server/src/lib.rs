//! gitpress-server - HTTP API surface for gitpress.

mod pages;
pub mod routes;
pub mod session;

use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::any;

use gitpress_github::GithubClient;

pub use routes::{CollaboratorRoutes, NoCollaborators, RouteKind};
pub use session::{BearerSessionStore, LoginSession, SessionStore};

/// Request body cap: base64-encoded image uploads travel in the upsert
/// body, so the limit is well above typical JSON payloads.
pub const BODY_LIMIT: usize = 20 * 1024 * 1024;

/// Shared state behind the API router.
#[derive(Clone)]
pub struct AppState {
    /// Session lookup for inbound requests.
    pub sessions: Arc<dyn SessionStore>,
    /// GitHub GraphQL client commits are sent through.
    pub github: GithubClient,
    /// Handlers for routes owned by external collaborators.
    pub collaborators: Arc<dyn CollaboratorRoutes>,
}

impl AppState {
    /// State with the default session store and no collaborators.
    pub fn new(github: GithubClient) -> Self {
        Self {
            sessions: Arc::new(BearerSessionStore),
            github,
            collaborators: Arc::new(NoCollaborators),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/gitpress/:route", any(dispatch))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

/// Dispatch a request by its route discriminator.
async fn dispatch(
    State(state): State<AppState>,
    Path(route): Path<String>,
    req: Request,
) -> Response {
    match RouteKind::parse(&route) {
        Some(RouteKind::Pages) => pages::handler(state, req).await,
        Some(kind) => state.collaborators.handle(kind, req).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
