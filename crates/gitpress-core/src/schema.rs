//! Document schema validation.
//!
//! Every collection validates edits against a fixed base shape (title,
//! publishedAt, content, status, slug) merged with the collection's
//! user-declared custom fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::types::Slug;

/// Allowed publication statuses.
const STATUSES: [&str; 2] = ["published", "draft"];

/// The primitive type of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line string.
    String,
    /// Multi-line text. Validates as a plain string; kept distinct so
    /// the admin UI can pick a different input widget.
    Text,
    Number,
    Boolean,
    /// RFC 3339 timestamp or `YYYY-MM-DD` date.
    Date,
}

/// A user-declared custom field on a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Primitive type of the field.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present and non-empty.
    #[serde(default)]
    pub required: bool,
}

/// Custom field declarations, keyed by field name.
pub type CustomFields = BTreeMap<String, CustomField>;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation schema for one collection's documents.
///
/// Built by [`document_schema`]; validates a front-matter document
/// (as JSON) and reports every violation rather than the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSchema {
    custom: CustomFields,
}

/// Build the schema for a collection by merging the fixed document
/// shape with its custom field declarations.
///
/// `text`-typed fields are coerced to `string` before merging; the
/// base type set validates them identically.
pub fn document_schema(custom_fields: &CustomFields) -> DocumentSchema {
    let custom = custom_fields
        .iter()
        .map(|(name, field)| {
            let field_type = match field.field_type {
                FieldType::Text => FieldType::String,
                other => other,
            };
            (
                name.clone(),
                CustomField {
                    field_type,
                    required: field.required,
                },
            )
        })
        .collect();

    DocumentSchema { custom }
}

impl DocumentSchema {
    /// Validate a document, returning every violation.
    pub fn validate(&self, document: &Value) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        self.check_required_string(document, "title", "Title is required.", &mut errors);
        self.check_required_string(document, "content", "Content is required.", &mut errors);
        self.check_published_at(document, &mut errors);
        self.check_status(document, &mut errors);
        self.check_slug(document, &mut errors);
        self.check_optional_string(document, "description", &mut errors);
        self.check_optional_string(document, "coverImage", &mut errors);
        self.check_author(document, &mut errors);

        for (name, field) in &self.custom {
            self.check_custom(document, name, field, &mut errors);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn check_required_string(
        &self,
        document: &Value,
        field: &str,
        missing: &str,
        errors: &mut Vec<FieldError>,
    ) {
        match document.get(field) {
            Some(Value::String(s)) if !s.is_empty() => {}
            Some(Value::String(_)) | Some(Value::Null) | None => errors.push(FieldError {
                field: field.to_string(),
                message: missing.to_string(),
            }),
            Some(_) => errors.push(FieldError {
                field: field.to_string(),
                message: "must be a string".to_string(),
            }),
        }
    }

    fn check_optional_string(&self, document: &Value, field: &str, errors: &mut Vec<FieldError>) {
        if let Some(value) = document.get(field) {
            if !value.is_string() && !value.is_null() {
                errors.push(FieldError {
                    field: field.to_string(),
                    message: "must be a string".to_string(),
                });
            }
        }
    }

    fn check_published_at(&self, document: &Value, errors: &mut Vec<FieldError>) {
        match document.get("publishedAt") {
            Some(Value::String(s)) if parse_date(s) => {}
            Some(Value::String(_)) => errors.push(FieldError {
                field: "publishedAt".to_string(),
                message: "must be a date".to_string(),
            }),
            _ => errors.push(FieldError {
                field: "publishedAt".to_string(),
                message: "Date is required.".to_string(),
            }),
        }
    }

    fn check_status(&self, document: &Value, errors: &mut Vec<FieldError>) {
        match document.get("status") {
            Some(Value::String(s)) if STATUSES.contains(&s.as_str()) => {}
            _ => errors.push(FieldError {
                field: "status".to_string(),
                message: "Status is missing.".to_string(),
            }),
        }
    }

    fn check_slug(&self, document: &Value, errors: &mut Vec<FieldError>) {
        match document.get("slug") {
            Some(Value::String(s)) => {
                if let Err(err) = Slug::new(s) {
                    errors.push(FieldError {
                        field: "slug".to_string(),
                        message: err.to_string(),
                    });
                }
            }
            _ => errors.push(FieldError {
                field: "slug".to_string(),
                message: "Slug is required.".to_string(),
            }),
        }
    }

    fn check_author(&self, document: &Value, errors: &mut Vec<FieldError>) {
        let Some(author) = document.get("author") else {
            return;
        };
        if author.is_null() {
            return;
        }
        let Some(author) = author.as_object() else {
            errors.push(FieldError {
                field: "author".to_string(),
                message: "must be an object".to_string(),
            });
            return;
        };
        for key in ["name", "picture"] {
            if let Some(value) = author.get(key) {
                if !value.is_string() && !value.is_null() {
                    errors.push(FieldError {
                        field: format!("author.{key}"),
                        message: "must be a string".to_string(),
                    });
                }
            }
        }
    }

    fn check_custom(
        &self,
        document: &Value,
        name: &str,
        field: &CustomField,
        errors: &mut Vec<FieldError>,
    ) {
        let value = document.get(name);
        let missing = matches!(value, None | Some(Value::Null))
            || matches!(value, Some(Value::String(s)) if s.is_empty());

        if missing {
            if field.required {
                errors.push(FieldError {
                    field: name.to_string(),
                    message: format!("{name} is required."),
                });
            }
            return;
        }

        let Some(value) = value else {
            return;
        };
        let ok = match field.field_type {
            FieldType::String | FieldType::Text => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Date => value.as_str().is_some_and(parse_date),
        };

        if !ok {
            errors.push(FieldError {
                field: name.to_string(),
                message: format!("must be a {:?}", field.field_type).to_lowercase(),
            });
        }
    }
}

fn parse_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok() || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
