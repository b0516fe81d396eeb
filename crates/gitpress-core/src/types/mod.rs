//! Core gitpress types.
//!
//! These types enforce content-tree invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod asset;
mod location;
mod slug;

pub use asset::{AssetKind, PendingFile};
pub use location::{ContentLocation, RepoTarget};
pub use slug::{Slug, SlugState};
