//! Human-readable explanations for recommendations.

use super::{Recommendation, RecommendationReason, ScoreSignal};
use crate::select::RecommendationSet;
use crate::types::Confidence;
use pathwise_content::CatalogEntry;
use serde::{Deserialize, Serialize};

/// Coarse confidence band shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLabel {
    Suggestion,
    GoodMatch,
    StrongMatch,
    ExcellentMatch,
}

impl ConfidenceLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suggestion => "Suggestion",
            Self::GoodMatch => "Good Match",
            Self::StrongMatch => "Strong Match",
            Self::ExcellentMatch => "Excellent Match",
        }
    }
}

impl std::fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a confidence value into its band. The boundaries partition [0, 1]:
/// below 0.3 is a suggestion, below 0.6 a good match, below 0.85 a strong
/// match, everything above an excellent match.
#[must_use]
pub fn confidence_label(confidence: Confidence) -> ConfidenceLabel {
    let value = confidence.value();
    if value < 0.3 {
        ConfidenceLabel::Suggestion
    } else if value < 0.6 {
        ConfidenceLabel::GoodMatch
    } else if value < 0.85 {
        ConfidenceLabel::StrongMatch
    } else {
        ConfidenceLabel::ExcellentMatch
    }
}

/// Static phrase for each reason tag.
///
/// The match is exhaustive with no fallback arm: adding a reason variant
/// without a phrase is a compile error, not a silent default.
#[must_use]
pub fn reason_phrase(reason: RecommendationReason) -> &'static str {
    match reason {
        RecommendationReason::ContinuesLearningPath => "Continues what you started",
        RecommendationReason::BuildsOnCompleted => "Builds on what you've completed",
        RecommendationReason::MatchesInterest => "Matches your interests",
        RecommendationReason::PopularChoice => "A popular place to start",
        RecommendationReason::SuitableForLevel => "Suited to your current level",
        RecommendationReason::QuickWin => "A quick win",
        RecommendationReason::PrerequisiteForGoal => "Unlocks something you're working toward",
        RecommendationReason::SimilarToLiked => "Similar to content you've enjoyed",
        RecommendationReason::FillsSkillGap => "Stretches you one level up",
        RecommendationReason::MaintainsStreak => "Keeps your streak going",
    }
}

/// Presentation form of one recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationExplanation {
    pub reason: RecommendationReason,
    pub confidence: ConfidenceLabel,
    /// Reason phrase composed with the item title.
    pub details: String,
}

/// Turn a scored recommendation into its presentation form.
pub fn explain_recommendation<T: CatalogEntry>(
    rec: &Recommendation<T>,
) -> RecommendationExplanation {
    let phrase = reason_phrase(rec.reason);
    RecommendationExplanation {
        reason: rec.reason,
        confidence: confidence_label(rec.confidence),
        details: format!("{}: {}", phrase, rec.item.title()),
    }
}

/// One-line summary of a cross-kind recommendation set.
#[must_use]
pub fn summarize_recommendations(set: &RecommendationSet) -> String {
    let total = set.len();
    if total == 0 {
        return "No recommendations available".to_string();
    }
    format!(
        "Found {} recommendations: {} articles, {} tutorials, {} paths",
        total,
        set.articles.len(),
        set.tutorials.len(),
        set.paths.len()
    )
}

/// Compose the per-item explanation string from the fired signals.
pub(crate) fn describe_signals(signals: &[ScoreSignal]) -> String {
    let mut parts = Vec::new();

    for signal in signals {
        let part = match signal {
            ScoreSignal::InProgress => "Continue where you left off".to_string(),
            ScoreSignal::UnmetPrerequisites { missing, total } => {
                format!("{missing} of {total} prerequisites still open")
            }
            ScoreSignal::BuildsOnCompleted { satisfied } => {
                if *satisfied == 1 {
                    "Builds on a prerequisite you've completed".to_string()
                } else {
                    format!("Builds on {satisfied} prerequisites you've completed")
                }
            }
            ScoreSignal::UnlocksInProgress { goal } => format!("Needed for {goal}"),
            ScoreSignal::InterestOverlap { matched, .. } => {
                if matched.len() == 1 {
                    format!("Matches your interest: {}", matched[0])
                } else {
                    format!("Matches your interests: {}", matched.join(", "))
                }
            }
            ScoreSignal::CategoryAffinity { category } => format!("More from {category}"),
            ScoreSignal::DifficultyDelta { delta } => match delta {
                0 => "Fits your current level".to_string(),
                1 => "A step up from your level".to_string(),
                -1 => "A lighter refresher".to_string(),
                _ => "Far from your current level".to_string(),
            },
            ScoreSignal::PreferredKind { .. } => "A format you tend to pick".to_string(),
            ScoreSignal::OverTimeBudget { minutes, budget } => {
                format!("Runs {} minutes over your {budget} minute window", minutes - budget)
            }
            ScoreSignal::StreakBoost { days } => {
                format!("Keeps your {days}-day streak alive")
            }
            ScoreSignal::QuickFit { minutes } => format!("Done in about {minutes} minutes"),
            ScoreSignal::Baseline => "A solid pick to get started".to_string(),
        };
        parts.push(part);
    }

    parts.join("; ")
}
