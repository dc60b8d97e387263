//! Behavioral user profiles derived from progress history.
//!
//! A profile is ephemeral: it is rebuilt (or incrementally advanced) from
//! the progress snapshot on demand and never persisted by this crate.

mod builder;
mod updater;

pub use builder::build_user_profile;
pub use updater::{update_profile_with_activity, EMA_ALPHA};

use pathwise_content::{ContentKind, Difficulty};
use serde::{Deserialize, Serialize};

/// Points below this are beginner territory.
pub const INTERMEDIATE_POINTS: u32 = 500;
/// Points at or above this mark an advanced user.
pub const ADVANCED_POINTS: u32 = 2000;

/// Hard cap on tracked interest tags.
pub const MAX_INTERESTS: usize = 10;

/// Coarse learner tier derived from cumulative points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Step function over cumulative points; boundaries belong to the
    /// upper tier (exactly 500 points is intermediate, exactly 2000 is
    /// advanced).
    #[must_use]
    pub fn from_points(points: u32) -> Self {
        if points >= ADVANCED_POINTS {
            Self::Advanced
        } else if points >= INTERMEDIATE_POINTS {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }

    /// Signed tier distance from this level to an item difficulty
    /// (positive = item is harder than the learner).
    #[must_use]
    pub fn delta_to(self, difficulty: Difficulty) -> i8 {
        difficulty.tier() - self.tier()
    }

    fn tier(self) -> i8 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Advanced => 2,
        }
    }
}

/// Weight distribution over the three content kinds.
///
/// Sums to 1.0 once the user has any completions; all-zero for a
/// brand-new user, which scoring treats as "no preference".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeWeights {
    pub articles: f64,
    pub tutorials: f64,
    pub paths: f64,
}

impl ContentTypeWeights {
    /// Weight for a specific kind.
    #[must_use]
    pub fn weight_for(&self, kind: ContentKind) -> f64 {
        match kind {
            ContentKind::Article => self.articles,
            ContentKind::Tutorial => self.tutorials,
            ContentKind::Path => self.paths,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.articles + self.tutorials + self.paths
    }
}

/// Weight distribution over the three difficulty tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyWeights {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl DifficultyWeights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.beginner + self.intermediate + self.advanced
    }
}

/// Observed average completion minutes per kind.
///
/// `None` means no completion of that kind has been observed yet; the
/// distinction from zero matters for time-fit scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionTimes {
    pub articles: Option<f64>,
    pub tutorials: Option<f64>,
}

/// Boolean learning-pattern flags from simple majority rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPatterns {
    /// Median completed-item duration falls under the short-content cutoff.
    pub prefers_short_content: bool,
    /// More interactive completions (tutorials, paths) than articles.
    pub prefers_interactive_content: bool,
    /// At least half of completed tutorials declared prerequisites.
    pub likes_prerequisites: bool,
}

/// Derived behavioral profile for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub skill_level: SkillLevel,
    /// Tag interests, most relevant first, capped at [`MAX_INTERESTS`].
    pub interests: Vec<String>,
    pub preferred_content_types: ContentTypeWeights,
    pub average_completion_time: CompletionTimes,
    pub difficulty_preference: DifficultyWeights,
    pub learning_patterns: LearningPatterns,
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::Beginner
    }
}

/// Defensive check for a profile deserialized from external storage.
///
/// Returns `false` (never panics) when any weight is out of [0, 1] or
/// non-finite, a weight distribution neither sums to ~1 nor is all-zero,
/// an average time is negative or non-finite, or the interest list breaks
/// its cap / contains empty tags.
#[must_use]
pub fn validate_user_profile(profile: &UserProfile) -> bool {
    const SUM_TOLERANCE: f64 = 1e-6;

    let unit = |w: f64| w.is_finite() && (0.0..=1.0).contains(&w);
    let distribution = |weights: &[f64]| {
        let sum: f64 = weights.iter().sum();
        weights.iter().all(|&w| unit(w))
            && (sum == 0.0 || (sum - 1.0).abs() < SUM_TOLERANCE)
    };

    let types = profile.preferred_content_types;
    if !distribution(&[types.articles, types.tutorials, types.paths]) {
        return false;
    }

    let difficulty = profile.difficulty_preference;
    if !distribution(&[
        difficulty.beginner,
        difficulty.intermediate,
        difficulty.advanced,
    ]) {
        return false;
    }

    let times = profile.average_completion_time;
    for time in [times.articles, times.tutorials].into_iter().flatten() {
        if !time.is_finite() || time < 0.0 {
            return false;
        }
    }

    profile.interests.len() <= MAX_INTERESTS
        && profile.interests.iter().all(|tag| !tag.is_empty())
}
