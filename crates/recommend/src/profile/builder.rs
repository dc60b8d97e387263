//! Full profile derivation from a progress snapshot.

use super::{
    CompletionTimes, ContentTypeWeights, DifficultyWeights, LearningPatterns, SkillLevel,
    UserProfile, MAX_INTERESTS,
};
use pathwise_content::{Article, CatalogEntry, Difficulty, Tutorial, UserProgress};
use std::collections::HashMap;

/// Median completed-item duration below this marks a short-content preference.
const SHORT_CONTENT_MEDIAN_MINUTES: f64 = 20.0;

/// Derive a behavioral profile from raw progress history.
///
/// The catalogs are only consulted to resolve tags, categories, and
/// durations of completed items; nothing is mutated. Calling twice with
/// identical inputs yields identical output.
pub fn build_user_profile(
    progress: &UserProgress,
    articles: &[Article],
    tutorials: &[Tutorial],
) -> UserProfile {
    let completed_articles: Vec<&Article> = articles
        .iter()
        .filter(|a| progress.completed_articles.contains(a.id()))
        .collect();
    let completed_tutorials: Vec<&Tutorial> = tutorials
        .iter()
        .filter(|t| progress.completed_tutorials.contains(t.id()))
        .collect();

    let profile = UserProfile {
        skill_level: SkillLevel::from_points(progress.total_points),
        interests: collect_interests(&completed_articles, &completed_tutorials),
        preferred_content_types: content_type_weights(progress),
        average_completion_time: CompletionTimes {
            articles: mean_minutes(&completed_articles),
            tutorials: mean_minutes(&completed_tutorials),
        },
        difficulty_preference: difficulty_weights(&completed_articles, &completed_tutorials),
        learning_patterns: learning_patterns(progress, &completed_articles, &completed_tutorials),
    };

    tracing::debug!(
        skill_level = ?profile.skill_level,
        interests = profile.interests.len(),
        completions = progress.completed_count(),
        "derived user profile"
    );

    profile
}

/// Tag frequency over completed content, ties broken by catalog order,
/// capped at [`MAX_INTERESTS`].
fn collect_interests(articles: &[&Article], tutorials: &[&Tutorial]) -> Vec<String> {
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    let mut order = 0usize;

    let tags = articles
        .iter()
        .flat_map(|a| a.tags())
        .chain(tutorials.iter().flat_map(|t| t.tags()));
    for tag in tags {
        let entry = counts.entry(tag.as_str()).or_insert_with(|| {
            let first_seen = order;
            (0, first_seen)
        });
        entry.0 += 1;
        order += 1;
    }

    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(tag, (count, first_seen))| (tag, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(MAX_INTERESTS);
    ranked.into_iter().map(|(tag, _, _)| tag.to_string()).collect()
}

/// Completion-count proportions; all-zero for a brand-new user.
fn content_type_weights(progress: &UserProgress) -> ContentTypeWeights {
    let articles = progress.completed_articles.len() as f64;
    let tutorials = progress.completed_tutorials.len() as f64;
    let paths = progress.completed_paths.len() as f64;
    let total = articles + tutorials + paths;

    if total == 0.0 {
        return ContentTypeWeights::default();
    }
    ContentTypeWeights {
        articles: articles / total,
        tutorials: tutorials / total,
        paths: paths / total,
    }
}

fn mean_minutes<T: CatalogEntry>(completed: &[&T]) -> Option<f64> {
    if completed.is_empty() {
        return None;
    }
    let total: u64 = completed.iter().map(|item| u64::from(item.minutes())).sum();
    Some(total as f64 / completed.len() as f64)
}

fn difficulty_weights(articles: &[&Article], tutorials: &[&Tutorial]) -> DifficultyWeights {
    let mut beginner = 0u64;
    let mut intermediate = 0u64;
    let mut advanced = 0u64;

    let difficulties = articles
        .iter()
        .filter_map(|a| a.difficulty())
        .chain(tutorials.iter().filter_map(|t| t.difficulty()));
    for difficulty in difficulties {
        match difficulty {
            Difficulty::Beginner => beginner += 1,
            Difficulty::Intermediate => intermediate += 1,
            Difficulty::Advanced => advanced += 1,
        }
    }

    let total = (beginner + intermediate + advanced) as f64;
    if total == 0.0 {
        return DifficultyWeights::default();
    }
    DifficultyWeights {
        beginner: beginner as f64 / total,
        intermediate: intermediate as f64 / total,
        advanced: advanced as f64 / total,
    }
}

fn learning_patterns(
    progress: &UserProgress,
    articles: &[&Article],
    tutorials: &[&Tutorial],
) -> LearningPatterns {
    let mut durations: Vec<u32> = articles
        .iter()
        .map(|a| a.minutes())
        .chain(tutorials.iter().map(|t| t.minutes()))
        .collect();
    durations.sort_unstable();

    let prefers_short_content =
        median(&durations).is_some_and(|m| m < SHORT_CONTENT_MEDIAN_MINUTES);

    let interactive = progress.completed_tutorials.len() + progress.completed_paths.len();
    let prefers_interactive_content = interactive > progress.completed_articles.len();

    let with_prerequisites = tutorials
        .iter()
        .filter(|t| !t.prerequisites().is_empty())
        .count();
    let likes_prerequisites =
        !tutorials.is_empty() && with_prerequisites * 2 >= tutorials.len();

    LearningPatterns {
        prefers_short_content,
        prefers_interactive_content,
        likes_prerequisites,
    }
}

fn median(sorted: &[u32]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(f64::from(sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(f64::from(sorted[mid]))
    }
}
