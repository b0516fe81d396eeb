//! Error types for the gitpress crates.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for gitpress operations.
///
/// This error type covers all possible failure modes across the crates,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing session, rejected token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API errors (GraphQL error envelopes, unexpected responses).
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid slug, path, document).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Serialization failures on wire payloads.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session or an empty access token was presented.
    #[error("missing access token")]
    MissingToken,

    /// The upstream API rejected the token.
    #[error("token rejected: {message}")]
    TokenRejected { message: String },
}

/// API-level errors from GraphQL responses.
///
/// Carries the HTTP status plus every message from the GraphQL error
/// envelope. A stale base-oid rejection from the commit mutation shows
/// up here; it is surfaced unchanged, never retried.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Messages from the GraphQL `errors` array (if any).
    pub messages: Vec<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.messages.is_empty() {
            write!(f, ": {}", self.messages.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, messages: Vec<String>) -> Self {
        Self { status, messages }
    }

    /// Check if this is an authentication failure.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid slug format.
    #[error("invalid slug '{value}': {reason}")]
    Slug { value: String, reason: String },

    /// Invalid repository target.
    #[error("invalid repository '{value}': {reason}")]
    Repo { value: String, reason: String },

    /// Document failed schema validation.
    #[error("document validation failed: {message}")]
    Document { message: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
