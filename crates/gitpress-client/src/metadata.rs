//! Metadata-index reconciliation.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use gitpress_core::Result;
use gitpress_core::metadata::{MetadataIndex, MetadataRecord, RecordInternal, content_hash};
use gitpress_core::types::{ContentLocation, Slug};
use gitpress_github::{MetadataDocument, hash_from_url};

/// Front-matter keys lifted into dedicated record fields.
const LIFTED_KEYS: [&str; 5] = ["title", "publishedAt", "status", "slug", "collection"];

/// Merge a document edit into the repository's metadata index.
///
/// No-op (empty map) unless the fetched GraphQL object resolved to a
/// text blob: when the index file does not exist yet, nothing is
/// rewritten. Otherwise the stale records for this document are
/// dropped, a fresh record is appended, and the re-serialized index is
/// returned as a single-entry replacement map keyed by its committed
/// path.
///
/// `content` must be the final, asset-rewritten body: the stored hash
/// is how consumers detect stale rendered content, so it has to match
/// what actually gets persisted.
pub fn save_metadata(
    document: Option<&MetadataDocument>,
    location: &ContentLocation,
    old_slug: Option<&Slug>,
    new_slug: &Slug,
    front_matter: &Map<String, Value>,
    content: &str,
) -> Result<BTreeMap<String, String>> {
    let Some((text, commit_url)) = document.and_then(MetadataDocument::blob) else {
        debug!("no metadata index file; skipping reconciliation");
        return Ok(BTreeMap::new());
    };

    let mut index = MetadataIndex::parse(text)?;
    index.generated = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    index.commit = hash_from_url(commit_url).to_string();

    index.remove_stale(
        &location.collection,
        old_slug.map(Slug::as_str),
        new_slug.as_str(),
    );

    let extra: Map<String, Value> = front_matter
        .iter()
        .filter(|(key, _)| !LIFTED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let as_string = |key: &str| {
        front_matter
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    index.metadata.push(MetadataRecord {
        slug: new_slug.as_str().to_string(),
        collection: location.collection.clone(),
        title: as_string("title"),
        published_at: as_string("publishedAt"),
        status: as_string("status"),
        extra,
        internal: Some(RecordInternal {
            hash: content_hash(content).to_string(),
            commit: index.commit.clone(),
            path: location.record_path(new_slug),
        }),
    });

    let mut replace_files = BTreeMap::new();
    replace_files.insert(location.metadata_path(), index.to_json_pretty()?);
    Ok(replace_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location() -> ContentLocation {
        ContentLocation::new(None, "content", "posts")
    }

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    fn blob_document(text: &str) -> MetadataDocument {
        serde_json::from_value(json!({
            "repository": {
                "object": {
                    "__typename": "Blob",
                    "text": text,
                    "commitUrl": "https://github.com/acme/site/commit/abc123"
                },
                "ref": null
            }
        }))
        .unwrap()
    }

    fn front_matter() -> Map<String, Value> {
        json!({
            "title": "Hello",
            "publishedAt": "2024-01-01T00:00:00Z",
            "status": "published",
            "category": "news"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn missing_document_is_a_no_op() {
        let out = save_metadata(
            None,
            &location(),
            None,
            &slug("hello"),
            &front_matter(),
            "# Hello",
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn non_blob_object_is_a_no_op() {
        let doc: MetadataDocument = serde_json::from_value(json!({
            "repository": { "object": { "__typename": "Tree" }, "ref": null }
        }))
        .unwrap();

        let out = save_metadata(
            Some(&doc),
            &location(),
            None,
            &slug("hello"),
            &front_matter(),
            "# Hello",
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn appends_record_with_hash_and_commit_marker() {
        let doc = blob_document("{}");
        let out = save_metadata(
            Some(&doc),
            &location(),
            None,
            &slug("hello"),
            &front_matter(),
            "# Hello",
        )
        .unwrap();

        let text = out.get("content/metadata.json").unwrap();
        let index: MetadataIndex = serde_json::from_str(text).unwrap();

        assert_eq!(index.commit, "abc123");
        assert!(!index.generated.is_empty());
        assert_eq!(index.metadata.len(), 1);

        let record = &index.metadata[0];
        assert_eq!(record.slug, "hello");
        assert_eq!(record.collection, "posts");
        assert_eq!(record.title.as_deref(), Some("Hello"));
        assert_eq!(record.extra["category"], "news");

        let internal = record.internal.as_ref().unwrap();
        assert_eq!(internal.hash, content_hash("# Hello").to_string());
        assert_eq!(internal.commit, "abc123");
        assert_eq!(internal.path, "content/posts/hello.md");
    }

    #[test]
    fn rename_replaces_both_slugs_in_collection() {
        let existing = json!({
            "generated": "2023-01-01T00:00:00.000Z",
            "commit": "old",
            "metadata": [
                { "slug": "hello", "collection": "posts" },
                { "slug": "world", "collection": "posts" },
                { "slug": "hello", "collection": "pages" }
            ]
        });
        let doc = blob_document(&existing.to_string());

        let out = save_metadata(
            Some(&doc),
            &location(),
            Some(&slug("hello")),
            &slug("world"),
            &front_matter(),
            "# World",
        )
        .unwrap();

        let index: MetadataIndex =
            serde_json::from_str(out.get("content/metadata.json").unwrap()).unwrap();

        let entries: Vec<_> = index
            .metadata
            .iter()
            .map(|r| (r.collection.as_str(), r.slug.as_str()))
            .collect();
        assert_eq!(entries, vec![("pages", "hello"), ("posts", "world")]);
    }

    #[test]
    fn repeated_saves_keep_one_record() {
        let doc = blob_document("{}");
        let first = save_metadata(
            Some(&doc),
            &location(),
            None,
            &slug("hello"),
            &front_matter(),
            "# v1",
        )
        .unwrap();

        let doc = blob_document(first.get("content/metadata.json").unwrap());
        let second = save_metadata(
            Some(&doc),
            &location(),
            None,
            &slug("hello"),
            &front_matter(),
            "# v2",
        )
        .unwrap();

        let index: MetadataIndex =
            serde_json::from_str(second.get("content/metadata.json").unwrap()).unwrap();
        assert_eq!(index.metadata.len(), 1);
        assert_eq!(
            index.metadata[0].internal.as_ref().unwrap().hash,
            content_hash("# v2").to_string()
        );
    }

    #[test]
    fn monorepo_prefix_applies_to_index_path_only() {
        let loc = ContentLocation::new(Some("apps/web".to_string()), "content", "posts");
        let doc = blob_document("{}");

        let out = save_metadata(Some(&doc), &loc, None, &slug("hello"), &front_matter(), "#")
            .unwrap();

        let (path, text) = out.iter().next().unwrap();
        assert_eq!(path, "apps/web/content/metadata.json");

        let index: MetadataIndex = serde_json::from_str(text).unwrap();
        assert_eq!(
            index.metadata[0].internal.as_ref().unwrap().path,
            "content/posts/hello.md"
        );
    }
}
