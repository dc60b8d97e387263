//! Catalog integrity validation.
//!
//! The content-storage collaborator supplies the catalogs; this check
//! runs before they are handed to the scoring engine.

use crate::items::{Article, CatalogEntry, LearningPath, Tutorial};
use std::collections::HashSet;
use thiserror::Error;

/// Integrity violations in a supplied catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The same slug/id appears more than once across the catalogs.
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),
    /// An item declares a prerequisite that no catalog item carries.
    #[error("item {item} declares unknown prerequisite {prerequisite}")]
    UnknownPrerequisite { item: String, prerequisite: String },
}

/// Validate catalog integrity across all three content kinds.
///
/// Rejects duplicate ids and prerequisite references to ids that exist
/// nowhere in the catalogs. Returns the first violation found, scanning
/// articles, then tutorials, then paths.
pub fn validate_catalog(
    articles: &[Article],
    tutorials: &[Tutorial],
    paths: &[LearningPath],
) -> Result<(), CatalogError> {
    let mut ids: HashSet<&str> = HashSet::new();

    for id in entry_ids(articles)
        .chain(entry_ids(tutorials))
        .chain(entry_ids(paths))
    {
        if !ids.insert(id) {
            return Err(CatalogError::DuplicateId(id.to_string()));
        }
    }

    for (item, prerequisite) in prerequisite_refs(articles)
        .chain(prerequisite_refs(tutorials))
        .chain(prerequisite_refs(paths))
    {
        if !ids.contains(prerequisite) {
            return Err(CatalogError::UnknownPrerequisite {
                item: item.to_string(),
                prerequisite: prerequisite.to_string(),
            });
        }
    }

    Ok(())
}

fn entry_ids<T: CatalogEntry>(entries: &[T]) -> impl Iterator<Item = &str> {
    entries.iter().map(|e| e.id())
}

fn prerequisite_refs<T: CatalogEntry>(entries: &[T]) -> impl Iterator<Item = (&str, &str)> {
    entries.iter().flat_map(|e| {
        e.prerequisites()
            .iter()
            .map(move |p| (e.id(), p.as_str()))
    })
}
