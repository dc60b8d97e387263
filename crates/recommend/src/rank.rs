//! Per-kind candidate ranking with a diversity-aware re-rank pass.

use crate::options::RecommendationOptions;
use crate::profile::{build_user_profile, UserProfile};
use crate::score::{score_with_context, Recommendation, ScoreContext};
use pathwise_content::{Article, CatalogEntry, LearningPath, Tutorial, UserProgress};
use std::collections::{HashMap, HashSet};

/// Penalty applied per already-selected item sharing a tag, scaled by
/// the diversity factor. At full factor a single shared tag outweighs a
/// top-position interest match, so near-duplicates cannot crowd the top.
const DIVERSITY_PENALTY_WEIGHT: f64 = 3.0;

/// Ranks candidates from borrowed, read-only catalogs.
///
/// Holds no mutable state: every call works on its own scored copies, so
/// one value can serve concurrent callers as long as each call gets its
/// own progress snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    articles: &'a [Article],
    tutorials: &'a [Tutorial],
    paths: &'a [LearningPath],
}

impl<'a> Recommender<'a> {
    pub fn new(
        articles: &'a [Article],
        tutorials: &'a [Tutorial],
        paths: &'a [LearningPath],
    ) -> Self {
        Self {
            articles,
            tutorials,
            paths,
        }
    }

    pub(crate) fn articles(&self) -> &'a [Article] {
        self.articles
    }

    pub(crate) fn tutorials(&self) -> &'a [Tutorial] {
        self.tutorials
    }

    pub(crate) fn paths(&self) -> &'a [LearningPath] {
        self.paths
    }

    /// Ranked article recommendations.
    pub fn recommended_articles(
        &self,
        progress: &UserProgress,
        options: &RecommendationOptions,
    ) -> Vec<Recommendation<Article>> {
        self.rank(self.articles, progress, options)
    }

    /// Ranked tutorial recommendations.
    pub fn recommended_tutorials(
        &self,
        progress: &UserProgress,
        options: &RecommendationOptions,
    ) -> Vec<Recommendation<Tutorial>> {
        self.rank(self.tutorials, progress, options)
    }

    /// Ranked learning-path recommendations.
    pub fn recommended_paths(
        &self,
        progress: &UserProgress,
        options: &RecommendationOptions,
    ) -> Vec<Recommendation<LearningPath>> {
        self.rank(self.paths, progress, options)
    }

    fn rank<T: CatalogEntry + Clone>(
        &self,
        catalog: &[T],
        progress: &UserProgress,
        options: &RecommendationOptions,
    ) -> Vec<Recommendation<T>> {
        if catalog.is_empty() {
            return Vec::new();
        }

        let options = options.clamped();
        let profile = build_user_profile(progress, self.articles, self.tutorials);
        let goal_prerequisites = self.goal_prerequisites(progress);
        let completed_categories = self.completed_categories(progress);
        let ctx = ScoreContext {
            profile: &profile,
            progress,
            options: &options,
            goal_prerequisites: &goal_prerequisites,
            completed_categories: &completed_categories,
        };

        let scored: Vec<(usize, Recommendation<T>)> = catalog
            .iter()
            .enumerate()
            .filter(|(_, item)| options.include_completed || !progress.is_completed(item.id()))
            .map(|(index, item)| (index, score_with_context(item, &ctx)))
            .collect();

        tracing::debug!(
            candidates = scored.len(),
            catalog = catalog.len(),
            diversity_factor = options.diversity_factor,
            "ranking candidates"
        );

        let ranked = diversity_rerank(scored, options.diversity_factor);
        ranked
            .into_iter()
            .filter(|rec| rec.confidence.value() >= options.min_confidence)
            .take(options.max_results)
            .collect()
    }

    /// Builds the profile the same way every ranking call does; exposed
    /// so callers can inspect what the ranking saw.
    #[must_use]
    pub fn profile_for(&self, progress: &UserProgress) -> UserProfile {
        build_user_profile(progress, self.articles, self.tutorials)
    }

    /// Map of prerequisite id -> in-progress content id it unlocks.
    /// Catalog iteration order keeps the mapping deterministic.
    fn goal_prerequisites(&self, progress: &UserProgress) -> HashMap<String, String> {
        let mut map = HashMap::new();

        let in_progress_tutorials = self
            .tutorials
            .iter()
            .filter(|t| progress.tutorial_progress.contains_key(t.id()))
            .map(|t| (t.id(), t.prerequisites()));
        let in_progress_paths = self
            .paths
            .iter()
            .filter(|p| progress.path_progress.contains_key(p.id()))
            .map(|p| (p.id(), p.prerequisites()));

        for (goal, prerequisites) in in_progress_tutorials.chain(in_progress_paths) {
            for prerequisite in prerequisites {
                if !progress.is_completed(prerequisite) {
                    map.entry(prerequisite.clone())
                        .or_insert_with(|| goal.to_string());
                }
            }
        }
        map
    }

    fn completed_categories(&self, progress: &UserProgress) -> HashSet<String> {
        let articles = self
            .articles
            .iter()
            .filter(|a| progress.completed_articles.contains(a.id()));
        let tutorials = self
            .tutorials
            .iter()
            .filter(|t| progress.completed_tutorials.contains(t.id()));
        let paths = self
            .paths
            .iter()
            .filter(|p| progress.completed_paths.contains(p.id()));

        articles
            .map(|a| a.category().to_string())
            .chain(tutorials.map(|t| t.category().to_string()))
            .chain(paths.map(|p| p.category().to_string()))
            .collect()
    }
}

/// Greedy single-pass re-rank: repeatedly select the best remaining
/// candidate, then penalize every unselected candidate sharing at least
/// one tag with it. Cumulative across selections; ties resolve by
/// catalog order. A zero factor reduces to pure score order.
fn diversity_rerank<T: CatalogEntry + Clone>(
    scored: Vec<(usize, Recommendation<T>)>,
    factor: f64,
) -> Vec<Recommendation<T>> {
    if factor <= 0.0 {
        let mut ranked = scored;
        ranked.sort_by(|a, b| {
            b.1.score
                .partial_cmp(&a.1.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        return ranked.into_iter().map(|(_, rec)| rec).collect();
    }

    let mut remaining: Vec<(usize, Recommendation<T>)> = scored;
    let mut selected = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        // Remaining entries stay in catalog order, so the first strict
        // maximum is also the catalog-order tie-break winner.
        let mut best = 0;
        for candidate in 1..remaining.len() {
            if remaining[candidate].1.score > remaining[best].1.score {
                best = candidate;
            }
        }

        let (_, picked) = remaining.remove(best);
        let picked_tags: HashSet<&str> =
            picked.item.tags().iter().map(String::as_str).collect();

        for (_, rec) in &mut remaining {
            let shares_tag = rec
                .item
                .tags()
                .iter()
                .any(|tag| picked_tags.contains(tag.as_str()));
            if shares_tag {
                rec.breakdown.diversity -= factor * DIVERSITY_PENALTY_WEIGHT;
                rec.score = rec.breakdown.total();
            }
        }

        selected.push(picked);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::RecommendationReason;
    use pathwise_content::Difficulty;

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

    fn interests_progress(articles: &[&str]) -> UserProgress {
        UserProgress {
            completed_articles: articles.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_catalog_returns_empty() {
        let recommender = Recommender::new(&[], &[], &[]);
        let recs = recommender.recommended_articles(
            &UserProgress::default(),
            &RecommendationOptions::default(),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_completed_items_excluded_by_default() {
        let articles = vec![article("done", &[]), article("fresh", &[])];
        let recommender = Recommender::new(&articles, &[], &[]);
        let progress = interests_progress(&["done"]);

        let recs =
            recommender.recommended_articles(&progress, &RecommendationOptions::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item.slug, "fresh");
    }

    #[test]
    fn test_include_completed_restores_candidates() {
        let articles = vec![article("done", &[]), article("fresh", &[])];
        let recommender = Recommender::new(&articles, &[], &[]);
        let progress = interests_progress(&["done"]);

        let excluded =
            recommender.recommended_articles(&progress, &RecommendationOptions::default());
        let included = recommender.recommended_articles(
            &progress,
            &RecommendationOptions::default().with_completed(),
        );
        assert_eq!(included.len(), excluded.len() + 1);
    }

    #[test]
    fn test_max_results_truncates() {
        let articles: Vec<Article> = (0..20).map(|i| article(&format!("a{i}"), &[])).collect();
        let recommender = Recommender::new(&articles, &[], &[]);

        let recs = recommender.recommended_articles(
            &UserProgress::default(),
            &RecommendationOptions::default().with_max_results(3),
        );
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_new_user_ranking_is_catalog_order() {
        let articles = vec![article("a1", &[]), article("a2", &[]), article("a3", &[])];
        let recommender = Recommender::new(&articles, &[], &[]);

        let recs = recommender.recommended_articles(
            &UserProgress::default(),
            &RecommendationOptions::default(),
        );
        let slugs: Vec<&str> = recs.iter().map(|r| r.item.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_zero_diversity_is_pure_score_order() {
        // "seed" completed -> interests {rust}; duplicates all match it.
        let articles = vec![
            article("seed", &["rust"]),
            article("dup1", &["rust"]),
            article("dup2", &["rust"]),
            article("dup3", &["rust"]),
            article("other", &[]),
        ];
        let recommender = Recommender::new(&articles, &[], &[]);
        let progress = interests_progress(&["seed"]);

        let recs = recommender.recommended_articles(
            &progress,
            &RecommendationOptions::default().with_diversity_factor(0.0),
        );
        let slugs: Vec<&str> = recs.iter().map(|r| r.item.slug.as_str()).collect();
        assert_eq!(slugs, vec!["dup1", "dup2", "dup3", "other"]);
    }

    #[test]
    fn test_diversity_breaks_up_near_duplicates() {
        let articles = vec![
            article("seed", &["rust"]),
            article("dup1", &["rust"]),
            article("dup2", &["rust"]),
            article("dup3", &["rust"]),
            article("other", &[]),
        ];
        let recommender = Recommender::new(&articles, &[], &[]);
        let progress = interests_progress(&["seed"]);

        let recs = recommender.recommended_articles(
            &progress,
            &RecommendationOptions::default().with_diversity_factor(1.0),
        );
        let slugs: Vec<&str> = recs.iter().map(|r| r.item.slug.as_str()).collect();
        // Penalized ranking differs from pure score order: at most one
        // duplicate survives in the top two.
        assert_eq!(slugs[0], "dup1");
        assert_eq!(slugs[1], "other");
        let dup_in_top2 = slugs[..2].iter().filter(|s| s.starts_with("dup")).count();
        assert_eq!(dup_in_top2, 1);
        // The penalty shows up in the breakdown of every demoted duplicate.
        let dup2 = recs.iter().find(|r| r.item.slug == "dup2").unwrap();
        assert!(dup2.breakdown.diversity < 0.0);
    }

    #[test]
    fn test_min_confidence_filters() {
        // Completing "seed" puts "rust" in the interests; "matched" then
        // carries more evidence than "plain".
        let articles = vec![
            article("seed", &["rust"]),
            article("plain", &[]),
            article("matched", &["rust"]),
        ];
        let recommender = Recommender::new(&articles, &[], &[]);
        let progress = interests_progress(&["seed"]);

        let unfiltered =
            recommender.recommended_articles(&progress, &RecommendationOptions::default());
        assert_eq!(unfiltered.len(), 2);

        let recs = recommender.recommended_articles(
            &progress,
            &RecommendationOptions::default().with_min_confidence(0.3),
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].item.slug, "matched");
    }

    #[test]
    fn test_in_progress_tutorial_ranks_first() {
        let tutorials = vec![
            Tutorial {
                id: "t1".to_string(),
                title: "t1".to_string(),
                category: "programming".to_string(),
                tags: vec!["rust".to_string(), "cli".to_string()],
                difficulty: Some(Difficulty::Beginner),
                minutes: 30,
                steps: 5,
                prerequisites: vec![],
            },
            Tutorial {
                id: "t2".to_string(),
                title: "t2".to_string(),
                category: "programming".to_string(),
                tags: vec![],
                difficulty: None,
                minutes: 30,
                steps: 5,
                prerequisites: vec![],
            },
        ];
        let recommender = Recommender::new(&[], &tutorials, &[]);
        let mut progress = UserProgress::default();
        progress.tutorial_progress.insert(
            "t2".to_string(),
            pathwise_content::TutorialProgress {
                started_at: chrono::DateTime::UNIX_EPOCH,
                completed_steps: vec![0],
            },
        );

        let recs = recommender
            .recommended_tutorials(&progress, &RecommendationOptions::default());
        assert_eq!(recs[0].item.id, "t2");
        assert_eq!(recs[0].reason, RecommendationReason::ContinuesLearningPath);
    }

    #[test]
    fn test_goal_prerequisite_surfaces_reason() {
        let tutorials = vec![
            Tutorial {
                id: "basics".to_string(),
                title: "basics".to_string(),
                category: "programming".to_string(),
                tags: vec![],
                difficulty: None,
                minutes: 20,
                steps: 3,
                prerequisites: vec![],
            },
            Tutorial {
                id: "advanced".to_string(),
                title: "advanced".to_string(),
                category: "programming".to_string(),
                tags: vec![],
                difficulty: None,
                minutes: 40,
                steps: 6,
                prerequisites: vec!["basics".to_string()],
            },
        ];
        let recommender = Recommender::new(&[], &tutorials, &[]);
        let mut progress = UserProgress::default();
        progress.tutorial_progress.insert(
            "advanced".to_string(),
            pathwise_content::TutorialProgress {
                started_at: chrono::DateTime::UNIX_EPOCH,
                completed_steps: vec![],
            },
        );

        let recs = recommender
            .recommended_tutorials(&progress, &RecommendationOptions::default());
        let basics = recs.iter().find(|r| r.item.id == "basics").unwrap();
        assert_eq!(basics.reason, RecommendationReason::PrerequisiteForGoal);
    }

    #[test]
    fn test_catalogs_are_not_mutated() {
        let articles = vec![article("a1", &["rust"]), article("a2", &["rust"])];
        let before = articles.clone();
        let recommender = Recommender::new(&articles, &[], &[]);

        let _ = recommender.recommended_articles(
            &interests_progress(&["a1"]),
            &RecommendationOptions::default().with_diversity_factor(1.0),
        );
        assert_eq!(articles, before);
    }
}
