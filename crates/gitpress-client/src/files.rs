//! Pending-asset resolution and in-document reference rewriting.
//!
//! Runs entirely before any network call: every placeholder token still
//! referenced by the document body is resolved to a permanent
//! repository path, the body is rewritten accordingly, and the asset
//! payloads are base64-encoded for transport.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;
use uuid::Uuid;

use gitpress_core::types::{ContentLocation, PendingFile};

/// The outcome of resolving pending assets against a document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenContent {
    /// Document body with every placeholder replaced by its permanent
    /// public path.
    pub content: String,
    /// Base64 asset payloads keyed by committed repository path.
    pub assets: BTreeMap<String, String>,
}

/// Lowercase a filename and replace anything outside
/// `[a-zA-Z0-9-_.]` with a dash. Idempotent on already-clean names.
pub fn sanitize_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Splice `-{suffix}` immediately before the final extension, or at the
/// end when there is none.
fn unique_filename(name: &str, suffix: &str) -> String {
    match name.rfind('.') {
        Some(idx) => format!("{}-{}{}", &name[..idx], suffix, &name[idx..]),
        None => format!("{}-{}", name, suffix),
    }
}

/// Resolve pending assets against the document body.
///
/// Files whose placeholder token no longer appears in the body were
/// removed by the editor before saving; they are silently dropped,
/// neither committed nor cleaned up.
pub fn handle_files(
    content: &str,
    files: &[PendingFile],
    location: &ContentLocation,
) -> RewrittenContent {
    let mut content = content.to_string();
    let mut assets = BTreeMap::new();

    for file in files {
        if file.blob.is_empty() || !content.contains(&file.blob) {
            continue;
        }

        let suffix = Uuid::new_v4().simple().to_string();
        let filename = unique_filename(&sanitize_filename(&file.filename), &suffix);

        let repo_path = location.asset_path(file.kind, &filename);
        let public_path = ContentLocation::asset_url(file.kind, &filename);
        debug!(blob = %file.blob, path = %repo_path, "resolving pending asset");

        assets.insert(repo_path, BASE64.encode(&file.content));
        content = content.replace(&file.blob, &public_path);
    }

    RewrittenContent { content, assets }
}
