//! The page-upsert handler.

use axum::Json;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{debug, error};

use gitpress_core::commit::CommitBuilder;
use gitpress_core::error::Error;
use gitpress_core::request::UpsertPageRequest;

use crate::session::LoginSession;
use crate::{AppState, BODY_LIMIT};

/// Handle `/api/gitpress/pages`.
///
/// The session gate runs before anything else; only then is the method
/// checked. Both failure modes answer with an empty body.
pub(crate) async fn handler(state: AppState, req: Request) -> Response {
    let session = state.sessions.login_session(req.headers()).await;
    let Some(session) = session.filter(LoginSession::has_token) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    if req.method() != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let bytes = match axum::body::to_bytes(req.into_body(), BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    let request: UpsertPageRequest = match serde_json::from_slice(&bytes) {
        Ok(request) => request,
        Err(err) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    post_handler(state, session, request).await
}

/// Build the commit for one upsert and send it upstream.
async fn post_handler(
    state: AppState,
    session: LoginSession,
    request: UpsertPageRequest,
) -> Response {
    let location = request.location();

    // A rename deletes the old document in the same commit.
    let old_slug = request.slug.rename_from(&request.new_slug);

    let message = match old_slug {
        Some(old) => format!("chore: Updates {} formerly {}", request.new_slug, old),
        None => format!("chore: Updates/Creates {}", request.new_slug),
    };

    let mut capi = CommitBuilder::new(message, request.repo_target(), &request.oid);

    if let Some(old) = old_slug {
        capi.remove_file(location.document_path(old));
    }

    capi.replace_file(
        location.document_path(&request.new_slug),
        &request.original_content,
    );

    for (path, contents) in &request.replace_files {
        capi.replace_file_encoded(path, contents);
    }

    debug!(
        slug = %request.new_slug,
        operations = capi.len(),
        "sending commit mutation"
    );

    let input = capi.create_input();

    match state
        .github
        .create_commit_on_branch(&input, &session.access_token)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(json!({ "input": input }))).into_response(),
        Err(Error::Auth(err)) => {
            error!(%err, "upstream rejected the session token");
            StatusCode::UNAUTHORIZED.into_response()
        }
        Err(err) => {
            // Includes stale-oid rejections; surfaced unchanged, never retried.
            error!(%err, "commit mutation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
