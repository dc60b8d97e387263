//! Personalized learning-content recommendations from progress history.
//!
//! This crate provides:
//! - Behavioral profile derivation from a user's progress snapshot
//! - Multi-signal scoring of candidate articles, tutorials, and paths
//! - Diversity-aware ranking with per-call tuning knobs
//! - Cross-kind selection, time-boxed bucketing, and explanations
//! - Incremental profile updates after a single activity
//!
//! The engine is purely computational: no I/O, no shared state between
//! calls, safe for concurrent use with per-call snapshots.

mod options;
pub mod profile;
mod rank;
mod score;
mod select;
mod types;

pub use options::{RecommendationOptions, DEFAULT_DIVERSITY_FACTOR, DEFAULT_MAX_RESULTS};
pub use profile::{
    build_user_profile, update_profile_with_activity, validate_user_profile, CompletionTimes,
    ContentTypeWeights, DifficultyWeights, LearningPatterns, SkillLevel, UserProfile, EMA_ALPHA,
    MAX_INTERESTS,
};
pub use rank::Recommender;
pub use score::{
    confidence_label, explain_recommendation, reason_phrase, score_item,
    summarize_recommendations, ConfidenceLabel, Recommendation, RecommendationExplanation,
    RecommendationReason, ScoreBreakdown, ScoreSignal,
};
pub use select::{
    RecommendationSet, TimeBucketedRecommendations, MODERATE_BUCKET_MINUTES, QUICK_BUCKET_MINUTES,
};
pub use types::Confidence;
