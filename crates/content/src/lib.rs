//! Content catalog and learner progress types for the pathwise engine.
//!
//! This crate owns the data model shared between the content-storage
//! collaborator and the recommendation engine:
//! - The [`ContentItem`] tagged union over articles, tutorials, and
//!   multi-step learning paths, with the [`CatalogEntry`] accessor seam.
//! - The [`UserProgress`] snapshot produced by the progress store.
//! - Catalog integrity validation ([`validate_catalog`]).

mod catalog;
mod items;
mod progress;

pub use catalog::{validate_catalog, CatalogError};
pub use items::{
    Article, CatalogEntry, ContentItem, ContentKind, Difficulty, LearningPath, Tutorial,
};
pub use progress::{PathProgress, TutorialProgress, UserProgress};
