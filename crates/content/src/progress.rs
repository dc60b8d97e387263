//! Learner progress snapshot as persisted by the progress store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// In-progress state for a started tutorial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialProgress {
    pub started_at: DateTime<Utc>,
    /// Indices of the steps already finished.
    #[serde(default)]
    pub completed_steps: Vec<u32>,
}

/// In-progress state for a started learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    pub started_at: DateTime<Utc>,
    /// Ids of the path items already finished.
    #[serde(default)]
    pub completed_items: Vec<String>,
}

/// Per-user progress aggregate.
///
/// Owned and persisted by the progress-store collaborator; the engine only
/// reads it. A brand-new user is the all-empty default, which every
/// consumer treats as "no data" rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(default)]
    pub completed_articles: HashSet<String>,
    #[serde(default)]
    pub completed_tutorials: HashSet<String>,
    #[serde(default)]
    pub completed_paths: HashSet<String>,
    /// Started-but-unfinished tutorials, keyed by tutorial id.
    #[serde(default)]
    pub tutorial_progress: HashMap<String, TutorialProgress>,
    /// Started-but-unfinished paths, keyed by path id.
    #[serde(default)]
    pub path_progress: HashMap<String, PathProgress>,
    #[serde(default)]
    pub total_points: u32,
    /// Consecutive days with activity.
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProgress {
    /// Whether the given id appears in any of the completed sets.
    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_articles.contains(id)
            || self.completed_tutorials.contains(id)
            || self.completed_paths.contains(id)
    }

    /// Whether the given id is a started-but-unfinished tutorial or path.
    #[must_use]
    pub fn is_in_progress(&self, id: &str) -> bool {
        self.tutorial_progress.contains_key(id) || self.path_progress.contains_key(id)
    }

    /// Total completions across all three kinds.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_articles.len() + self.completed_tutorials.len() + self.completed_paths.len()
    }
}
