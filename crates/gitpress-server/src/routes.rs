//! Typed API route dispatch.

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// The API routes reachable under `/api/gitpress/{route}`.
///
/// A closed enum dispatched by `match`: an unknown discriminator is a
/// 404, not a crash, and adding a route without wiring a handler is a
/// compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// OAuth callback (external collaborator).
    Callback,
    /// Login redirect (external collaborator).
    Login,
    /// Sign-out (external collaborator).
    Signout,
    /// Current-user lookup (external collaborator).
    User,
    /// Image serving/upload (external collaborator).
    Images,
    /// Page upsert, handled by this crate.
    Pages,
}

impl RouteKind {
    /// Parse a route discriminator from the request path.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "callback" => Some(Self::Callback),
            "login" => Some(Self::Login),
            "signout" => Some(Self::Signout),
            "user" => Some(Self::User),
            "images" => Some(Self::Images),
            "pages" => Some(Self::Pages),
            _ => None,
        }
    }
}

/// Handlers for the routes this crate does not own.
///
/// The auth flow and image serving are external collaborators; a
/// deployment plugs its own implementation in, tests plug in a stub.
#[async_trait]
pub trait CollaboratorRoutes: Send + Sync {
    /// Handle a collaborator route.
    async fn handle(&self, kind: RouteKind, req: Request) -> Response;
}

/// Collaborator stub answering 404 for every route.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollaborators;

#[async_trait]
impl CollaboratorRoutes for NoCollaborators {
    async fn handle(&self, _kind: RouteKind, _req: Request) -> Response {
        StatusCode::NOT_FOUND.into_response()
    }
}
