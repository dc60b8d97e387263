//! Shared test fixtures for pathwise crates.
//!
//! In-memory catalog and progress builders used across the workspace's
//! test suites. Fixtures use fixed timestamps so tests stay
//! deterministic.

use chrono::{DateTime, TimeZone, Utc};
use pathwise_content::{
    Article, LearningPath, PathProgress, Tutorial, TutorialProgress, UserProgress,
};

/// Fixed reference instant used by all fixtures.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

/// Article fixture: 10 minutes, "programming" category, no difficulty.
/// Override fields with struct-update syntax.
pub fn article(slug: &str, tags: &[&str]) -> Article {
    Article {
        slug: slug.to_string(),
        title: title_case(slug),
        category: "programming".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        difficulty: None,
        minutes: 10,
        prerequisites: vec![],
    }
}

/// Tutorial fixture: 30 minutes, 5 steps.
pub fn tutorial(id: &str, tags: &[&str]) -> Tutorial {
    Tutorial {
        id: id.to_string(),
        title: title_case(id),
        category: "programming".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        difficulty: None,
        minutes: 30,
        steps: 5,
        prerequisites: vec![],
    }
}

/// Learning-path fixture: 120 minutes, empty item list.
pub fn learning_path(id: &str, tags: &[&str]) -> LearningPath {
    LearningPath {
        id: id.to_string(),
        title: title_case(id),
        category: "programming".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        difficulty: None,
        minutes: 120,
        items: vec![],
        prerequisites: vec![],
    }
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fluent builder for [`UserProgress`] snapshots.
#[derive(Debug, Default)]
pub struct ProgressBuilder {
    progress: UserProgress,
}

impl ProgressBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn completed_article(mut self, slug: &str) -> Self {
        self.progress.completed_articles.insert(slug.to_string());
        self
    }

    #[must_use]
    pub fn completed_tutorial(mut self, id: &str) -> Self {
        self.progress.completed_tutorials.insert(id.to_string());
        self
    }

    #[must_use]
    pub fn completed_path(mut self, id: &str) -> Self {
        self.progress.completed_paths.insert(id.to_string());
        self
    }

    #[must_use]
    pub fn points(mut self, points: u32) -> Self {
        self.progress.total_points = points;
        self
    }

    #[must_use]
    pub fn streak(mut self, days: u32) -> Self {
        self.progress.streak_days = days;
        self
    }

    #[must_use]
    pub fn in_progress_tutorial(mut self, id: &str, completed_steps: &[u32]) -> Self {
        self.progress.tutorial_progress.insert(
            id.to_string(),
            TutorialProgress {
                started_at: fixed_time(),
                completed_steps: completed_steps.to_vec(),
            },
        );
        self
    }

    #[must_use]
    pub fn in_progress_path(mut self, id: &str, completed_items: &[&str]) -> Self {
        self.progress.path_progress.insert(
            id.to_string(),
            PathProgress {
                started_at: fixed_time(),
                completed_items: completed_items.iter().map(|i| i.to_string()).collect(),
            },
        );
        self
    }

    #[must_use]
    pub fn build(mut self) -> UserProgress {
        self.progress.last_activity = Some(fixed_time());
        self.progress.created_at = Some(fixed_time());
        self.progress
    }
}
