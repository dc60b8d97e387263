//! Recommendation records, scoring signals, and score breakdowns.

mod explainer;
mod scorer;

pub use explainer::{
    confidence_label, explain_recommendation, reason_phrase, summarize_recommendations,
    ConfidenceLabel, RecommendationExplanation,
};
pub use scorer::score_item;
pub(crate) use scorer::{score_with_context, ScoreContext};

use crate::types::Confidence;
use serde::{Deserialize, Serialize};

/// Why an item was recommended. Closed set; every consumer matches
/// exhaustively, so an out-of-contract tag cannot exist at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    ContinuesLearningPath,
    BuildsOnCompleted,
    MatchesInterest,
    PopularChoice,
    SuitableForLevel,
    QuickWin,
    PrerequisiteForGoal,
    SimilarToLiked,
    FillsSkillGap,
    MaintainsStreak,
}

/// Signals that contributed to an item's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScoreSignal {
    /// The item is the user's current in-progress tutorial or path.
    InProgress,
    /// Declared prerequisites the user has not completed yet.
    UnmetPrerequisites { missing: usize, total: usize },
    /// All declared prerequisites are already completed.
    BuildsOnCompleted { satisfied: usize },
    /// The item is a prerequisite of something the user has in progress.
    UnlocksInProgress { goal: String },
    /// Item tags found in the user's interest list.
    InterestOverlap {
        matched: Vec<String>,
        /// Position-weighted overlap strength.
        weight: f64,
    },
    /// The item's category matches completed content.
    CategoryAffinity { category: String },
    /// Tier distance between item difficulty and the user's level
    /// (positive = harder than the user).
    DifficultyDelta { delta: i8 },
    /// The user historically favors this content kind.
    PreferredKind { weight: f64 },
    /// Estimated duration exceeds the caller's time budget.
    OverTimeBudget { minutes: u32, budget: u32 },
    /// Short item while a day streak is alive.
    StreakBoost { days: u32 },
    /// Short item that fits inside an explicit time budget.
    QuickFit { minutes: u32 },
    /// No positive signal fired; the constant base keeps the ranking
    /// deterministic and non-empty for brand-new users.
    Baseline,
}

impl ScoreSignal {
    /// Short label for this signal.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::UnmetPrerequisites { .. } => "unmet-prerequisites",
            Self::BuildsOnCompleted { .. } => "builds-on-completed",
            Self::UnlocksInProgress { .. } => "unlocks-in-progress",
            Self::InterestOverlap { .. } => "interest-overlap",
            Self::CategoryAffinity { .. } => "category-affinity",
            Self::DifficultyDelta { .. } => "difficulty-fit",
            Self::PreferredKind { .. } => "preferred-kind",
            Self::OverTimeBudget { .. } => "over-time-budget",
            Self::StreakBoost { .. } => "streak-boost",
            Self::QuickFit { .. } => "quick-fit",
            Self::Baseline => "baseline",
        }
    }
}

/// Per-component score contributions. The total is the recommendation's
/// score; components may be negative (penalties).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Continuation bonus for in-progress content.
    pub continuation: f64,
    /// Prerequisite chain fit (penalty when unmet, bonus when satisfied).
    pub prerequisites: f64,
    /// Tag-interest and category affinity.
    pub interest: f64,
    /// Difficulty fit against the user's level.
    pub difficulty: f64,
    /// Content-kind preference.
    pub preference: f64,
    /// Time-budget fit (zero or negative).
    pub time_fit: f64,
    /// Streak and quick-win bonuses.
    pub momentum: f64,
    /// Constant popularity fallback.
    pub base: f64,
    /// Penalty applied by the diversity re-ranking pass.
    pub diversity: f64,
}

impl ScoreBreakdown {
    /// Sum of all components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.continuation
            + self.prerequisites
            + self.interest
            + self.difficulty
            + self.preference
            + self.time_fit
            + self.momentum
            + self.base
            + self.diversity
    }
}

/// A scored, explainable recommendation for one candidate item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation<T> {
    pub item: T,
    /// Combined score; comparable only within one ranking call.
    pub score: f64,
    /// Evidence strength, independent of the score.
    pub confidence: Confidence,
    pub reason: RecommendationReason,
    /// Human-readable summary of the fired signals.
    pub explanation: String,
    pub breakdown: ScoreBreakdown,
    pub signals: Vec<ScoreSignal>,
}

impl<T> Recommendation<T> {
    /// Map the carried item, preserving every scoring field.
    pub fn map_item<U>(self, f: impl FnOnce(T) -> U) -> Recommendation<U> {
        Recommendation {
            item: f(self.item),
            score: self.score,
            confidence: self.confidence,
            reason: self.reason,
            explanation: self.explanation,
            breakdown: self.breakdown,
            signals: self.signals,
        }
    }
}
