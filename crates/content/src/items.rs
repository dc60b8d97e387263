//! Catalog item types: articles, tutorials, and learning paths.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a catalog item or a learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Numeric tier used for distance comparisons (0 = beginner).
    #[must_use]
    pub fn tier(self) -> i8 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Advanced => 2,
        }
    }

    /// Absolute tier distance between two difficulties.
    #[must_use]
    pub fn gap(self, other: Difficulty) -> u8 {
        (self.tier() - other.tier()).unsigned_abs()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        write!(f, "{label}")
    }
}

/// The three content kinds served by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Article,
    Tutorial,
    Path,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Article => "article",
            Self::Tutorial => "tutorial",
            Self::Path => "path",
        };
        write!(f, "{label}")
    }
}

/// A standalone written piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique slug within the catalog.
    pub slug: String,
    pub title: String,
    /// Section/category the article is filed under.
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Estimated reading time in minutes.
    pub minutes: u32,
    /// Ids of content that should be completed first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// An interactive, step-based tutorial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    /// Unique id within the catalog.
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Estimated completion time in minutes.
    pub minutes: u32,
    /// Number of steps in the tutorial.
    pub steps: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// A curated multi-item learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    /// Unique id within the catalog.
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Estimated time to finish the whole path, in minutes.
    pub minutes: u32,
    /// Ids of the items that make up the path, in order.
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// Tagged union over the three catalog item types.
///
/// The engine scores items through this union (or through the
/// [`CatalogEntry`] seam), so per-variant field access stays exhaustively
/// type-checked rather than duck-typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Article(Article),
    Tutorial(Tutorial),
    Path(LearningPath),
}

/// Uniform read-only access to the fields every catalog item carries.
///
/// Implemented by each concrete item type and by [`ContentItem`] itself,
/// so scoring code can be generic over a single kind or the union.
pub trait CatalogEntry {
    /// Unique slug/id within the catalog.
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn category(&self) -> &str;
    fn tags(&self) -> &[String];
    fn difficulty(&self) -> Option<Difficulty>;
    /// Estimated duration in minutes.
    fn minutes(&self) -> u32;
    fn prerequisites(&self) -> &[String];
    fn kind(&self) -> ContentKind;
}

macro_rules! impl_catalog_entry {
    ($ty:ty, $id:ident, $kind:expr) => {
        impl CatalogEntry for $ty {
            fn id(&self) -> &str {
                &self.$id
            }
            fn title(&self) -> &str {
                &self.title
            }
            fn category(&self) -> &str {
                &self.category
            }
            fn tags(&self) -> &[String] {
                &self.tags
            }
            fn difficulty(&self) -> Option<Difficulty> {
                self.difficulty
            }
            fn minutes(&self) -> u32 {
                self.minutes
            }
            fn prerequisites(&self) -> &[String] {
                &self.prerequisites
            }
            fn kind(&self) -> ContentKind {
                $kind
            }
        }
    };
}

impl_catalog_entry!(Article, slug, ContentKind::Article);
impl_catalog_entry!(Tutorial, id, ContentKind::Tutorial);
impl_catalog_entry!(LearningPath, id, ContentKind::Path);

impl CatalogEntry for ContentItem {
    fn id(&self) -> &str {
        match self {
            Self::Article(a) => a.id(),
            Self::Tutorial(t) => t.id(),
            Self::Path(p) => p.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            Self::Article(a) => a.title(),
            Self::Tutorial(t) => t.title(),
            Self::Path(p) => p.title(),
        }
    }

    fn category(&self) -> &str {
        match self {
            Self::Article(a) => a.category(),
            Self::Tutorial(t) => t.category(),
            Self::Path(p) => p.category(),
        }
    }

    fn tags(&self) -> &[String] {
        match self {
            Self::Article(a) => a.tags(),
            Self::Tutorial(t) => t.tags(),
            Self::Path(p) => p.tags(),
        }
    }

    fn difficulty(&self) -> Option<Difficulty> {
        match self {
            Self::Article(a) => a.difficulty(),
            Self::Tutorial(t) => t.difficulty(),
            Self::Path(p) => p.difficulty(),
        }
    }

    fn minutes(&self) -> u32 {
        match self {
            Self::Article(a) => a.minutes(),
            Self::Tutorial(t) => t.minutes(),
            Self::Path(p) => p.minutes(),
        }
    }

    fn prerequisites(&self) -> &[String] {
        match self {
            Self::Article(a) => a.prerequisites(),
            Self::Tutorial(t) => t.prerequisites(),
            Self::Path(p) => p.prerequisites(),
        }
    }

    fn kind(&self) -> ContentKind {
        match self {
            Self::Article(_) => ContentKind::Article,
            Self::Tutorial(_) => ContentKind::Tutorial,
            Self::Path(_) => ContentKind::Path,
        }
    }
}
