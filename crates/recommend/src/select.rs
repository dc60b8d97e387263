//! Cross-kind selection: combined sets, the single next pick, and
//! time-boxed buckets.

use crate::options::RecommendationOptions;
use crate::rank::Recommender;
use crate::score::Recommendation;
use pathwise_content::{Article, CatalogEntry, ContentItem, LearningPath, Tutorial, UserProgress};
use serde::{Deserialize, Serialize};

/// Duration ceiling of the quick bucket, in minutes.
pub const QUICK_BUCKET_MINUTES: u32 = 15;
/// Duration ceiling of the moderate bucket, in minutes.
pub const MODERATE_BUCKET_MINUTES: u32 = 45;

/// Ranked recommendations for all three content kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub articles: Vec<Recommendation<Article>>,
    pub tutorials: Vec<Recommendation<Tutorial>>,
    pub paths: Vec<Recommendation<LearningPath>>,
}

impl RecommendationSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len() + self.tutorials.len() + self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Recommendations partitioned by fixed duration buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketedRecommendations {
    /// At most [`QUICK_BUCKET_MINUTES`] minutes.
    pub quick: Vec<Recommendation<ContentItem>>,
    /// Over quick, at most [`MODERATE_BUCKET_MINUTES`] minutes.
    pub moderate: Vec<Recommendation<ContentItem>>,
    /// Everything longer.
    pub long: Vec<Recommendation<ContentItem>>,
}

impl Recommender<'_> {
    /// Ranked recommendations for every kind, same options per kind.
    pub fn all_recommendations(
        &self,
        progress: &UserProgress,
        options: &RecommendationOptions,
    ) -> RecommendationSet {
        RecommendationSet {
            articles: self.recommended_articles(progress, options),
            tutorials: self.recommended_tutorials(progress, options),
            paths: self.recommended_paths(progress, options),
        }
    }

    /// The single best item across all kinds, favoring in-progress
    /// content by construction of the continuation bonus.
    ///
    /// Returns `None` only when all three catalogs are empty; a user who
    /// has completed everything falls back to revisitable content.
    pub fn next_recommendation(
        &self,
        progress: &UserProgress,
    ) -> Option<Recommendation<ContentItem>> {
        let catalogs_empty =
            self.articles().is_empty() && self.tutorials().is_empty() && self.paths().is_empty();
        if catalogs_empty {
            return None;
        }

        let options = RecommendationOptions::default().with_max_results(1);
        let pick = self
            .top_across_kinds(progress, &options)
            .or_else(|| {
                // Everything completed: recommend the best revisit.
                self.top_across_kinds(progress, &options.clone().with_completed())
            });

        if let Some(ref rec) = pick {
            tracing::debug!(
                item = rec.item.id(),
                score = rec.score,
                reason = ?rec.reason,
                "selected next recommendation"
            );
        }
        pick
    }

    /// The full ranked union, partitioned into quick/moderate/long
    /// buckets. `available_minutes` feeds the scoring time constraint;
    /// the bucket boundaries are fixed constants, not derived from it.
    pub fn recommendations_by_time(
        &self,
        progress: &UserProgress,
        available_minutes: u32,
    ) -> TimeBucketedRecommendations {
        let mut options = RecommendationOptions::default().with_max_results(usize::MAX);
        if available_minutes > 0 {
            options = options.with_time_constraint(available_minutes);
        }

        let mut buckets = TimeBucketedRecommendations::default();
        for rec in self.ranked_union(progress, &options) {
            let minutes = rec.item.minutes();
            if minutes <= QUICK_BUCKET_MINUTES {
                buckets.quick.push(rec);
            } else if minutes <= MODERATE_BUCKET_MINUTES {
                buckets.moderate.push(rec);
            } else {
                buckets.long.push(rec);
            }
        }
        buckets
    }

    fn top_across_kinds(
        &self,
        progress: &UserProgress,
        options: &RecommendationOptions,
    ) -> Option<Recommendation<ContentItem>> {
        self.ranked_union(progress, options).into_iter().next()
    }

    /// Union of the three ranked lists, ordered by score with a stable
    /// article/tutorial/path tie-break.
    fn ranked_union(
        &self,
        progress: &UserProgress,
        options: &RecommendationOptions,
    ) -> Vec<Recommendation<ContentItem>> {
        let set = self.all_recommendations(progress, options);
        let mut union: Vec<Recommendation<ContentItem>> = set
            .articles
            .into_iter()
            .map(|rec| rec.map_item(ContentItem::Article))
            .chain(
                set.tutorials
                    .into_iter()
                    .map(|rec| rec.map_item(ContentItem::Tutorial)),
            )
            .chain(
                set.paths
                    .into_iter()
                    .map(|rec| rec.map_item(ContentItem::Path)),
            )
            .collect();

        union.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        union
    }
}
