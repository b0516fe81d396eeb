//! Uploaded asset types.

use serde::{Deserialize, Serialize};

/// The category of an uploaded binary asset.
///
/// A closed enum so that an unhandled category is a compile error
/// rather than a runtime crash when a new kind is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// An image referenced from the document body.
    #[serde(rename = "images")]
    Image,
}

impl AssetKind {
    /// Repository directory (under `public/`) where assets of this
    /// kind are stored. Includes the trailing slash.
    pub fn upload_dir(&self) -> &'static str {
        match self {
            AssetKind::Image => "images/",
        }
    }
}

/// A binary asset uploaded alongside a document edit.
///
/// The `blob` token is a temporary placeholder embedded in the document
/// body at upload time; it is resolved to a permanent repository path
/// during commit construction and never persisted. Raw contents travel
/// base64-encoded on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingFile {
    /// Original filename as uploaded.
    pub filename: String,
    /// Placeholder token currently embedded in the document body.
    pub blob: String,
    /// Asset category.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Raw contents.
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl PendingFile {
    /// Create a pending file from raw uploaded bytes.
    pub fn new(
        filename: impl Into<String>,
        blob: impl Into<String>,
        kind: AssetKind,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            blob: blob.into(),
            kind,
            content: content.into(),
        }
    }
}

/// Serde adapter carrying raw bytes as base64 text on the wire.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        BASE64.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}
