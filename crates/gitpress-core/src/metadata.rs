//! The metadata index model.
//!
//! Each content root keeps a single denormalized `metadata.json` file
//! summarizing every document's front-matter plus a content hash and
//! commit marker, so consumers can detect stale rendered content
//! without re-fetching full document bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::Result;

/// 32-bit non-cryptographic hash of a document body.
///
/// Stored per metadata record; only ever compared against hashes
/// produced by this same function, so stability across process runs is
/// what matters, not collision resistance.
pub fn content_hash(text: &str) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write(text.as_bytes());
    hasher.finish() as u32
}

/// Internal bookkeeping block attached to every metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInternal {
    /// Content hash of the document body at commit time.
    pub hash: String,
    /// Commit marker the record was written under.
    pub commit: String,
    /// Document path relative to the content repository.
    pub path: String,
}

/// One document's entry in the metadata index.
///
/// Custom front-matter fields are carried verbatim in `extra`; the
/// well-known fields are lifted out so consumers can rely on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Document slug.
    pub slug: String,
    /// Collection the document belongs to.
    pub collection: String,
    /// Document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Publication timestamp.
    #[serde(rename = "publishedAt", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Publication status (`published` or `draft`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remaining front-matter fields, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Internal block; absent on records written by older tooling.
    #[serde(rename = "__gitpress", default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<RecordInternal>,
}

/// The metadata index file for one content root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataIndex {
    /// ISO-8601 timestamp of the last regeneration.
    #[serde(default)]
    pub generated: String,
    /// Last known commit hash of the index.
    #[serde(default)]
    pub commit: String,
    /// Per-document records.
    #[serde(default)]
    pub metadata: Vec<MetadataRecord>,
}

impl MetadataIndex {
    /// Parse an index from stored text. Empty text parses as an empty
    /// index, matching how a freshly initialized content root starts.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Drop every record in `collection` matching either slug, so the
    /// appended replacement is the only record for that document.
    pub fn remove_stale(&mut self, collection: &str, old_slug: Option<&str>, new_slug: &str) {
        self.metadata.retain(|record| {
            record.collection != collection
                || (Some(record.slug.as_str()) != old_slug && record.slug != new_slug)
        });
    }

    /// Serialize the index the way it is committed: pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(collection: &str, slug: &str) -> MetadataRecord {
        MetadataRecord {
            slug: slug.to_string(),
            collection: collection.to_string(),
            title: Some(slug.to_string()),
            published_at: None,
            status: Some("published".to_string()),
            extra: Map::new(),
            internal: None,
        }
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        assert_eq!(content_hash("# Hello"), content_hash("# Hello"));
        assert_ne!(content_hash("# Hello"), content_hash("# Hello!"));
    }

    #[test]
    fn empty_text_parses_as_empty_index() {
        let index = MetadataIndex::parse("").unwrap();
        assert!(index.metadata.is_empty());
        assert!(index.commit.is_empty());
    }

    #[test]
    fn remove_stale_drops_old_and_new_slug_in_collection() {
        let mut index = MetadataIndex {
            metadata: vec![
                record("posts", "hello"),
                record("posts", "world"),
                record("posts", "other"),
                record("pages", "hello"),
            ],
            ..Default::default()
        };

        index.remove_stale("posts", Some("hello"), "world");

        let remaining: Vec<_> = index
            .metadata
            .iter()
            .map(|r| (r.collection.as_str(), r.slug.as_str()))
            .collect();
        assert_eq!(remaining, vec![("posts", "other"), ("pages", "hello")]);
    }

    #[test]
    fn remove_stale_without_old_slug() {
        let mut index = MetadataIndex {
            metadata: vec![record("posts", "world"), record("posts", "other")],
            ..Default::default()
        };

        index.remove_stale("posts", None, "world");
        assert_eq!(index.metadata.len(), 1);
        assert_eq!(index.metadata[0].slug, "other");
    }

    #[test]
    fn custom_fields_round_trip_flattened() {
        let json = serde_json::json!({
            "slug": "hello",
            "collection": "posts",
            "title": "Hello",
            "publishedAt": "2024-01-01T00:00:00Z",
            "status": "published",
            "category": "news",
            "__gitpress": {
                "hash": "123",
                "commit": "abc",
                "path": "content/posts/hello.md"
            }
        });

        let record: MetadataRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(record.extra["category"], "news");
        assert_eq!(serde_json::to_value(&record).unwrap(), json);
    }
}
