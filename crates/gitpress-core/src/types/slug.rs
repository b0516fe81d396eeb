//! Slug types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The wire sentinel meaning "this document has not been created yet".
const NEW_SENTINEL: &str = "new";

/// A validated document slug.
///
/// Slugs name markdown documents within a collection and double as URL
/// path segments, so the format is deliberately strict: lowercase
/// letters, digits and dashes only, no leading/trailing dash, no `--`,
/// and never the reserved word `new`.
///
/// # Example
///
/// ```
/// use gitpress_core::Slug;
///
/// let slug = Slug::new("my-first-post").unwrap();
/// assert_eq!(slug.as_str(), "my-first-post");
/// assert!(Slug::new("new").is_err());
/// assert!(Slug::new("My Post").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Create a new slug from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid slug.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| InvalidInputError::Slug {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("must not be empty").into());
        }
        if s == NEW_SENTINEL {
            return Err(invalid("the word 'new' is reserved").into());
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(
                invalid("may only contain lowercase letters, numbers and dashes").into(),
            );
        }
        if s.starts_with('-') || s.ends_with('-') {
            return Err(invalid("must not start or end with a dash").into());
        }
        if s.contains("--") {
            return Err(invalid("must not contain two dashes in a row").into());
        }

        Ok(())
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Slug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Slug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Slug::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The identity of a document before an edit is committed.
///
/// The admin UI historically sent the literal string `new` to mean "not
/// yet created"; this type makes that state explicit instead of leaving
/// a sentinel comparison scattered through handlers. On the wire it
/// still serializes to `new` / the slug string for compatibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlugState {
    /// The document does not exist yet.
    New,
    /// The document already exists under this slug.
    Existing(Slug),
}

impl SlugState {
    /// Returns the existing slug, if any.
    pub fn existing(&self) -> Option<&Slug> {
        match self {
            SlugState::New => None,
            SlugState::Existing(slug) => Some(slug),
        }
    }

    /// The slug to delete when renaming to `new_slug`.
    ///
    /// Defined only when the document already exists under a different
    /// slug; creating a document or saving it under the same slug never
    /// queues a delete.
    pub fn rename_from(&self, new_slug: &Slug) -> Option<&Slug> {
        match self {
            SlugState::New => None,
            SlugState::Existing(slug) if slug == new_slug => None,
            SlugState::Existing(slug) => Some(slug),
        }
    }
}

impl fmt::Display for SlugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlugState::New => write!(f, "{}", NEW_SENTINEL),
            SlugState::Existing(slug) => write!(f, "{}", slug),
        }
    }
}

impl Serialize for SlugState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            SlugState::New => serializer.serialize_str(NEW_SENTINEL),
            SlugState::Existing(slug) => serializer.serialize_str(slug.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for SlugState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == NEW_SENTINEL {
            return Ok(SlugState::New);
        }
        Slug::new(&s)
            .map(SlugState::Existing)
            .map_err(serde::de::Error::custom)
    }
}
