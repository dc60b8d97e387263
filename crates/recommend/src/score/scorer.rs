//! Multi-signal scoring of a single candidate item.

use super::{explainer, Recommendation, RecommendationReason, ScoreBreakdown, ScoreSignal};
use crate::options::RecommendationOptions;
use crate::profile::{UserProfile, MAX_INTERESTS};
use crate::types::Confidence;
use pathwise_content::{CatalogEntry, UserProgress};
use std::collections::{HashMap, HashSet};

/// Weights for the scoring signals. Signals combine additively, so a
/// zero signal never wipes out the others.
const CONTINUATION_WEIGHT: f64 = 25.0;
const PREREQ_GAP_WEIGHT: f64 = 3.0;
const PREREQ_CHAIN_WEIGHT: f64 = 1.5;
const GOAL_UNLOCK_WEIGHT: f64 = 2.0;
const INTEREST_WEIGHT: f64 = 2.5;
const CATEGORY_WEIGHT: f64 = 1.0;
const DIFFICULTY_MATCH_WEIGHT: f64 = 2.0;
const DIFFICULTY_ADJACENT_WEIGHT: f64 = 0.75;
const DIFFICULTY_GAP_WEIGHT: f64 = 1.5;
const KIND_PREFERENCE_WEIGHT: f64 = 1.5;
const TIME_OVER_WEIGHT: f64 = 4.0;
const STREAK_WEIGHT: f64 = 1.0;
const QUICK_FIT_WEIGHT: f64 = 0.75;
const BASE_SCORE: f64 = 0.5;

/// Items at or under this duration count as quick wins.
pub(crate) const QUICK_WIN_MINUTES: u32 = 15;

/// Only the three strongest interest matches contribute weight.
const INTEREST_MATCH_CAP: usize = 3;

/// Confidence is evidence-driven: a fixed floor plus an increment per
/// fired positive signal, clamped by the `Confidence` constructor.
const BASE_CONFIDENCE: f64 = 0.15;
const EV_CONTINUATION: f64 = 0.4;
const EV_PREREQ_CHAIN: f64 = 0.1;
const EV_GOAL_UNLOCK: f64 = 0.1;
const EV_INTEREST: f64 = 0.15;
const EV_CATEGORY: f64 = 0.08;
const EV_DIFFICULTY_MATCH: f64 = 0.15;
const EV_DIFFICULTY_ADJACENT: f64 = 0.08;
const EV_PREFERRED_KIND: f64 = 0.05;
const EV_STREAK: f64 = 0.05;
const EV_QUICK_FIT: f64 = 0.05;

/// Everything a scoring pass needs besides the item itself.
///
/// The ranking layer precomputes the catalog-derived lookups once per
/// call; the public [`score_item`] entry point runs without them.
pub(crate) struct ScoreContext<'a> {
    pub profile: &'a UserProfile,
    pub progress: &'a UserProgress,
    pub options: &'a RecommendationOptions,
    /// Item id -> id of the in-progress content it unlocks.
    pub goal_prerequisites: &'a HashMap<String, String>,
    /// Categories the user has completed content in.
    pub completed_categories: &'a HashSet<String>,
}

/// Score one candidate item against a profile and progress snapshot.
///
/// Pure and allocation-local; inputs are never mutated. Catalog-wide
/// context signals (goal unlocks, category affinity) only fire through
/// the ranking layer, which can see the full catalogs.
pub fn score_item<T: CatalogEntry + Clone>(
    item: &T,
    profile: &UserProfile,
    progress: &UserProgress,
    options: &RecommendationOptions,
) -> Recommendation<T> {
    let goal_prerequisites = HashMap::new();
    let completed_categories = HashSet::new();
    score_with_context(
        item,
        &ScoreContext {
            profile,
            progress,
            options,
            goal_prerequisites: &goal_prerequisites,
            completed_categories: &completed_categories,
        },
    )
}

pub(crate) fn score_with_context<T: CatalogEntry + Clone>(
    item: &T,
    ctx: &ScoreContext<'_>,
) -> Recommendation<T> {
    let signals = collect_signals(item, ctx);
    let breakdown = fold_signals(&signals);
    let confidence = evidence_confidence(&signals);
    let reason = pick_reason(&signals);
    let explanation = explainer::describe_signals(&signals);

    Recommendation {
        item: item.clone(),
        score: breakdown.total(),
        confidence,
        reason,
        explanation,
        breakdown,
        signals,
    }
}

fn collect_signals<T: CatalogEntry>(item: &T, ctx: &ScoreContext<'_>) -> Vec<ScoreSignal> {
    let mut signals = Vec::new();

    if ctx.progress.is_in_progress(item.id()) {
        signals.push(ScoreSignal::InProgress);
    }

    let prerequisites = item.prerequisites();
    if !prerequisites.is_empty() {
        let missing = prerequisites
            .iter()
            .filter(|p| !ctx.progress.is_completed(p))
            .count();
        if missing > 0 {
            signals.push(ScoreSignal::UnmetPrerequisites {
                missing,
                total: prerequisites.len(),
            });
        } else {
            signals.push(ScoreSignal::BuildsOnCompleted {
                satisfied: prerequisites.len(),
            });
        }
    }

    if let Some(goal) = ctx.goal_prerequisites.get(item.id()) {
        signals.push(ScoreSignal::UnlocksInProgress { goal: goal.clone() });
    }

    let (matched, weight) = interest_overlap(item, ctx.profile);
    if !matched.is_empty() {
        signals.push(ScoreSignal::InterestOverlap { matched, weight });
    }

    if ctx.completed_categories.contains(item.category()) {
        signals.push(ScoreSignal::CategoryAffinity {
            category: item.category().to_string(),
        });
    }

    if let Some(difficulty) = item.difficulty() {
        signals.push(ScoreSignal::DifficultyDelta {
            delta: ctx.profile.skill_level.delta_to(difficulty),
        });
    }

    let kind_weight = ctx.profile.preferred_content_types.weight_for(item.kind());
    if kind_weight > 0.0 {
        signals.push(ScoreSignal::PreferredKind {
            weight: kind_weight,
        });
    }

    if let Some(budget) = ctx.options.time_constraint {
        if item.minutes() > budget {
            signals.push(ScoreSignal::OverTimeBudget {
                minutes: item.minutes(),
                budget,
            });
        } else if item.minutes() <= QUICK_WIN_MINUTES {
            signals.push(ScoreSignal::QuickFit {
                minutes: item.minutes(),
            });
        }
    }

    if item.minutes() <= QUICK_WIN_MINUTES && ctx.progress.streak_days > 0 {
        signals.push(ScoreSignal::StreakBoost {
            days: ctx.progress.streak_days,
        });
    }

    if signals.is_empty() {
        signals.push(ScoreSignal::Baseline);
    }

    signals
}

/// Tags the item shares with the interest list, ordered by interest
/// position, with a position-decayed weight over the strongest
/// [`INTEREST_MATCH_CAP`] matches.
fn interest_overlap<T: CatalogEntry>(item: &T, profile: &UserProfile) -> (Vec<String>, f64) {
    let mut matches: Vec<(usize, &String)> = item
        .tags()
        .iter()
        .filter_map(|tag| {
            profile
                .interests
                .iter()
                .position(|interest| interest == tag)
                .map(|position| (position, tag))
        })
        .collect();
    matches.sort_by_key(|(position, _)| *position);
    matches.dedup_by_key(|(position, _)| *position);

    let weight = matches
        .iter()
        .take(INTEREST_MATCH_CAP)
        .map(|(position, _)| {
            // Past-cap positions (possible in unvalidated external
            // profiles) contribute nothing rather than underflowing.
            MAX_INTERESTS.saturating_sub(*position) as f64 / MAX_INTERESTS as f64
        })
        .sum();
    let matched = matches.into_iter().map(|(_, tag)| tag.clone()).collect();
    (matched, weight)
}

fn fold_signals(signals: &[ScoreSignal]) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown {
        base: BASE_SCORE,
        ..Default::default()
    };

    for signal in signals {
        match signal {
            ScoreSignal::InProgress => breakdown.continuation += CONTINUATION_WEIGHT,
            ScoreSignal::UnmetPrerequisites { missing, total } => {
                breakdown.prerequisites -=
                    PREREQ_GAP_WEIGHT * (*missing as f64 / *total as f64);
            }
            ScoreSignal::BuildsOnCompleted { .. } => {
                breakdown.prerequisites += PREREQ_CHAIN_WEIGHT;
            }
            ScoreSignal::UnlocksInProgress { .. } => {
                breakdown.prerequisites += GOAL_UNLOCK_WEIGHT;
            }
            ScoreSignal::InterestOverlap { weight, .. } => {
                breakdown.interest += INTEREST_WEIGHT * weight;
            }
            ScoreSignal::CategoryAffinity { .. } => breakdown.interest += CATEGORY_WEIGHT,
            ScoreSignal::DifficultyDelta { delta } => {
                breakdown.difficulty += match delta.abs() {
                    0 => DIFFICULTY_MATCH_WEIGHT,
                    1 => DIFFICULTY_ADJACENT_WEIGHT,
                    _ => -DIFFICULTY_GAP_WEIGHT,
                };
            }
            ScoreSignal::PreferredKind { weight } => {
                breakdown.preference += KIND_PREFERENCE_WEIGHT * weight;
            }
            ScoreSignal::OverTimeBudget { .. } => breakdown.time_fit -= TIME_OVER_WEIGHT,
            ScoreSignal::StreakBoost { .. } => breakdown.momentum += STREAK_WEIGHT,
            ScoreSignal::QuickFit { .. } => breakdown.momentum += QUICK_FIT_WEIGHT,
            ScoreSignal::Baseline => {}
        }
    }

    breakdown
}

fn evidence_confidence(signals: &[ScoreSignal]) -> Confidence {
    let evidence: f64 = signals
        .iter()
        .map(|signal| match signal {
            ScoreSignal::InProgress => EV_CONTINUATION,
            ScoreSignal::BuildsOnCompleted { .. } => EV_PREREQ_CHAIN,
            ScoreSignal::UnlocksInProgress { .. } => EV_GOAL_UNLOCK,
            ScoreSignal::InterestOverlap { .. } => EV_INTEREST,
            ScoreSignal::CategoryAffinity { .. } => EV_CATEGORY,
            ScoreSignal::DifficultyDelta { delta } => match delta.abs() {
                0 => EV_DIFFICULTY_MATCH,
                1 => EV_DIFFICULTY_ADJACENT,
                _ => 0.0,
            },
            ScoreSignal::PreferredKind { .. } => EV_PREFERRED_KIND,
            ScoreSignal::StreakBoost { .. } => EV_STREAK,
            ScoreSignal::QuickFit { .. } => EV_QUICK_FIT,
            ScoreSignal::UnmetPrerequisites { .. }
            | ScoreSignal::OverTimeBudget { .. }
            | ScoreSignal::Baseline => 0.0,
        })
        .sum();

    Confidence::new(BASE_CONFIDENCE + evidence)
}

/// The single strongest contributing signal names the reason, under a
/// fixed priority: continuation, then prerequisite-chain fit, interest,
/// quick-win momentum, difficulty fit, affinity, popularity fallback.
fn pick_reason(signals: &[ScoreSignal]) -> RecommendationReason {
    let has = |predicate: fn(&ScoreSignal) -> bool| signals.iter().any(predicate);

    if has(|s| matches!(s, ScoreSignal::InProgress)) {
        RecommendationReason::ContinuesLearningPath
    } else if has(|s| matches!(s, ScoreSignal::UnlocksInProgress { .. })) {
        RecommendationReason::PrerequisiteForGoal
    } else if has(|s| matches!(s, ScoreSignal::BuildsOnCompleted { .. })) {
        RecommendationReason::BuildsOnCompleted
    } else if has(|s| matches!(s, ScoreSignal::InterestOverlap { .. })) {
        RecommendationReason::MatchesInterest
    } else if has(|s| matches!(s, ScoreSignal::QuickFit { .. })) {
        RecommendationReason::QuickWin
    } else if has(|s| matches!(s, ScoreSignal::StreakBoost { .. })) {
        RecommendationReason::MaintainsStreak
    } else if has(|s| matches!(s, ScoreSignal::DifficultyDelta { delta: 0 })) {
        RecommendationReason::SuitableForLevel
    } else if has(|s| matches!(s, ScoreSignal::DifficultyDelta { delta: 1 })) {
        RecommendationReason::FillsSkillGap
    } else if has(|s| matches!(s, ScoreSignal::CategoryAffinity { .. })) {
        RecommendationReason::SimilarToLiked
    } else {
        RecommendationReason::PopularChoice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SkillLevel;
    use pathwise_content::{Article, Difficulty, Tutorial};

    fn article(slug: &str, tags: &[&str]) -> Article {
        Article {
            slug: slug.to_string(),
            title: slug.to_string(),
            category: "programming".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            difficulty: None,
            minutes: 30,
            prerequisites: vec![],
        }
    }

    fn tutorial(id: &str) -> Tutorial {
        Tutorial {
            id: id.to_string(),
            title: id.to_string(),
            category: "programming".to_string(),
            tags: vec![],
            difficulty: None,
            minutes: 30,
            steps: 4,
            prerequisites: vec![],
        }
    }

    fn profile_with_interests(interests: &[&str]) -> UserProfile {
        UserProfile {
            interests: interests.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn default_options() -> RecommendationOptions {
        RecommendationOptions::default()
    }

    #[test]
    fn test_new_user_gets_baseline_score() {
        let rec = score_item(
            &article("a1", &[]),
            &UserProfile::default(),
            &UserProgress::default(),
            &default_options(),
        );
        assert_eq!(rec.score, BASE_SCORE);
        assert_eq!(rec.reason, RecommendationReason::PopularChoice);
        assert_eq!(rec.signals, vec![ScoreSignal::Baseline]);
    }

    #[test]
    fn test_in_progress_tutorial_dominates() {
        let mut progress = UserProgress::default();
        progress.tutorial_progress.insert(
            "t1".to_string(),
            pathwise_content::TutorialProgress {
                started_at: chrono::DateTime::UNIX_EPOCH,
                completed_steps: vec![],
            },
        );

        let rec = score_item(
            &tutorial("t1"),
            &UserProfile::default(),
            &progress,
            &default_options(),
        );
        assert_eq!(rec.reason, RecommendationReason::ContinuesLearningPath);
        assert!(rec.score >= CONTINUATION_WEIGHT);
        assert_eq!(rec.breakdown.continuation, CONTINUATION_WEIGHT);
    }

    #[test]
    fn test_unmet_prerequisites_penalize_proportionally() {
        let item = Article {
            prerequisites: vec!["p1".to_string(), "p2".to_string()],
            ..article("a1", &[])
        };
        let mut progress = UserProgress::default();
        progress.completed_articles.insert("p1".to_string());

        let rec = score_item(
            &item,
            &UserProfile::default(),
            &progress,
            &default_options(),
        );
        // Half the prerequisites are open.
        assert!((rec.breakdown.prerequisites - (-PREREQ_GAP_WEIGHT * 0.5)).abs() < 1e-9);
        // Down-weighted, not excluded.
        assert!(rec.score < BASE_SCORE);
    }

    #[test]
    fn test_satisfied_prerequisites_become_a_bonus() {
        let item = Article {
            prerequisites: vec!["p1".to_string()],
            ..article("a1", &[])
        };
        let mut progress = UserProgress::default();
        progress.completed_articles.insert("p1".to_string());

        let rec = score_item(
            &item,
            &UserProfile::default(),
            &progress,
            &default_options(),
        );
        assert_eq!(rec.breakdown.prerequisites, PREREQ_CHAIN_WEIGHT);
        assert_eq!(rec.reason, RecommendationReason::BuildsOnCompleted);
    }

    #[test]
    fn test_interest_overlap_weights_by_position() {
        let profile = profile_with_interests(&["rust", "async", "wasm"]);
        let top = score_item(
            &article("a1", &["rust"]),
            &profile,
            &UserProgress::default(),
            &default_options(),
        );
        let lower = score_item(
            &article("a2", &["wasm"]),
            &profile,
            &UserProgress::default(),
            &default_options(),
        );
        assert!(top.breakdown.interest > lower.breakdown.interest);
        assert_eq!(top.reason, RecommendationReason::MatchesInterest);
    }

    #[test]
    fn test_interest_matches_cap_at_three() {
        let profile = profile_with_interests(&["a", "b", "c", "d", "e"]);
        let three = score_item(
            &article("a1", &["a", "b", "c"]),
            &profile,
            &UserProgress::default(),
            &default_options(),
        );
        let five = score_item(
            &article("a2", &["a", "b", "c", "d", "e"]),
            &profile,
            &UserProgress::default(),
            &default_options(),
        );
        assert!((three.breakdown.interest - five.breakdown.interest).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_fit_match_beats_adjacent_beats_gap() {
        let profile = UserProfile {
            skill_level: SkillLevel::Beginner,
            ..Default::default()
        };
        let score_for = |difficulty| {
            let item = Article {
                difficulty: Some(difficulty),
                ..article("a", &[])
            };
            score_item(&item, &profile, &UserProgress::default(), &default_options())
                .breakdown
                .difficulty
        };

        let matched = score_for(Difficulty::Beginner);
        let adjacent = score_for(Difficulty::Intermediate);
        let gap = score_for(Difficulty::Advanced);
        assert!(matched > adjacent);
        assert!(adjacent > gap);
        assert!(gap < 0.0);
    }

    #[test]
    fn test_time_constraint_penalizes_but_keeps_item() {
        let options = default_options().with_time_constraint(10);
        let rec = score_item(
            &article("a1", &[]),
            &UserProfile::default(),
            &UserProgress::default(),
            &options,
        );
        assert_eq!(rec.breakdown.time_fit, -TIME_OVER_WEIGHT);
        assert!(rec.score < 0.0);
    }

    #[test]
    fn test_short_item_within_budget_is_a_quick_win() {
        let item = Article {
            minutes: 10,
            ..article("a1", &[])
        };
        let options = default_options().with_time_constraint(30);
        let rec = score_item(
            &item,
            &UserProfile::default(),
            &UserProgress::default(),
            &options,
        );
        assert_eq!(rec.reason, RecommendationReason::QuickWin);
        assert_eq!(rec.breakdown.momentum, QUICK_FIT_WEIGHT);
    }

    #[test]
    fn test_streak_rewards_short_items() {
        let item = Article {
            minutes: 10,
            ..article("a1", &[])
        };
        let progress = UserProgress {
            streak_days: 6,
            ..Default::default()
        };
        let rec = score_item(
            &item,
            &UserProfile::default(),
            &progress,
            &default_options(),
        );
        assert_eq!(rec.reason, RecommendationReason::MaintainsStreak);
        assert_eq!(rec.breakdown.momentum, STREAK_WEIGHT);
    }

    #[test]
    fn test_long_item_gets_no_streak_boost() {
        let progress = UserProgress {
            streak_days: 6,
            ..Default::default()
        };
        let rec = score_item(
            &article("a1", &[]),
            &UserProfile::default(),
            &progress,
            &default_options(),
        );
        assert_eq!(rec.breakdown.momentum, 0.0);
    }

    #[test]
    fn test_kind_preference_scales_with_weight() {
        let profile = UserProfile {
            preferred_content_types: crate::profile::ContentTypeWeights {
                articles: 0.8,
                tutorials: 0.2,
                paths: 0.0,
            },
            ..Default::default()
        };
        let rec = score_item(
            &article("a1", &[]),
            &profile,
            &UserProgress::default(),
            &default_options(),
        );
        assert!((rec.breakdown.preference - KIND_PREFERENCE_WEIGHT * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_tracks_evidence_not_score() {
        let profile = profile_with_interests(&["rust"]);
        let item = Article {
            prerequisites: vec!["p1".to_string()],
            ..article("a1", &["rust"])
        };
        let mut progress = UserProgress::default();
        progress.completed_articles.insert("p1".to_string());

        let backed = score_item(&item, &profile, &progress, &default_options());
        let fallback = score_item(
            &article("a2", &[]),
            &UserProfile::default(),
            &UserProgress::default(),
            &default_options(),
        );
        assert!(backed.confidence > fallback.confidence);
        assert_eq!(fallback.confidence.value(), BASE_CONFIDENCE);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let mut progress = UserProgress::default();
        progress.streak_days = 9;
        progress.tutorial_progress.insert(
            "t1".to_string(),
            pathwise_content::TutorialProgress {
                started_at: chrono::DateTime::UNIX_EPOCH,
                completed_steps: vec![],
            },
        );
        progress.completed_articles.insert("p1".to_string());

        let profile = UserProfile {
            skill_level: SkillLevel::Intermediate,
            interests: vec!["rust".to_string()],
            preferred_content_types: crate::profile::ContentTypeWeights {
                articles: 0.0,
                tutorials: 1.0,
                paths: 0.0,
            },
            ..Default::default()
        };
        let item = Tutorial {
            tags: vec!["rust".to_string()],
            difficulty: Some(Difficulty::Intermediate),
            minutes: 10,
            prerequisites: vec!["p1".to_string()],
            ..tutorial("t1")
        };
        let options = default_options().with_time_constraint(20);

        let rec = score_item(&item, &profile, &progress, &options);
        assert!(rec.confidence.value() <= 1.0);
        assert_eq!(rec.reason, RecommendationReason::ContinuesLearningPath);
    }
}
