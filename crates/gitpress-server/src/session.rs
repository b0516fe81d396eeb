//! Login-session lookup.
//!
//! Authentication itself (OAuth flow, cookie issuance) lives outside
//! this crate; the API only asks one question per request: is there a
//! session, and does it carry an access token.

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

/// An authenticated editing session.
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// GitHub access token the commit is made with.
    pub access_token: String,
}

impl LoginSession {
    /// Whether the session carries a usable token.
    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Resolves the login session for an inbound request.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up the session, if any, for a request's headers.
    async fn login_session(&self, headers: &HeaderMap) -> Option<LoginSession>;
}

/// Session lookup from a bearer `Authorization` header.
///
/// The default store for deployments that terminate the OAuth flow
/// elsewhere and forward the resulting token per request.
#[derive(Debug, Clone, Default)]
pub struct BearerSessionStore;

#[async_trait]
impl SessionStore for BearerSessionStore {
    async fn login_session(&self, headers: &HeaderMap) -> Option<LoginSession> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?;
        Some(LoginSession {
            access_token: token.to_string(),
        })
    }
}
