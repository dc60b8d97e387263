//! Incremental profile adjustment after a single activity.
//!
//! The counterpart of [`build_user_profile`](super::build_user_profile):
//! instead of a full recompute, one new observation is blended into the
//! existing profile. The two operations keep separate contracts on
//! purpose; the incremental path never touches skill level, difficulty
//! preference, or the pattern flags.

use super::{ContentTypeWeights, UserProfile, MAX_INTERESTS};
use pathwise_content::ContentKind;

/// Blend weight for a single new observation against the running state.
pub const EMA_ALPHA: f64 = 0.3;

/// Return a new profile with one completed activity folded in.
///
/// The input profile is not mutated. Content-type weights move toward the
/// activity's kind and are renormalized; the per-kind average completion
/// time blends the observed minutes; activity tags take the front of the
/// interest list (moved if already present, never duplicated), and the
/// list is truncated back to [`MAX_INTERESTS`] from the tail.
#[must_use]
pub fn update_profile_with_activity(
    profile: &UserProfile,
    kind: ContentKind,
    tags: &[String],
    minutes_spent: f64,
) -> UserProfile {
    let mut updated = profile.clone();
    updated.preferred_content_types = blend_type_weights(&profile.preferred_content_types, kind);
    blend_completion_time(&mut updated, kind, minutes_spent);
    updated.interests = merge_interests(&profile.interests, tags);
    updated
}

/// EMA step toward the one-hot vector of `kind`, renormalized so the
/// weights keep summing to 1 (a brand-new all-zero profile concentrates
/// fully on the observed kind).
fn blend_type_weights(weights: &ContentTypeWeights, kind: ContentKind) -> ContentTypeWeights {
    let target = |k: ContentKind| if k == kind { 1.0 } else { 0.0 };
    let blend = |old: f64, k: ContentKind| (1.0 - EMA_ALPHA) * old + EMA_ALPHA * target(k);

    let mut blended = ContentTypeWeights {
        articles: blend(weights.articles, ContentKind::Article),
        tutorials: blend(weights.tutorials, ContentKind::Tutorial),
        paths: blend(weights.paths, ContentKind::Path),
    };
    let sum = blended.sum();
    if sum > 0.0 {
        blended.articles /= sum;
        blended.tutorials /= sum;
        blended.paths /= sum;
    }
    blended
}

fn blend_completion_time(profile: &mut UserProfile, kind: ContentKind, minutes_spent: f64) {
    if !minutes_spent.is_finite() || minutes_spent <= 0.0 {
        return;
    }
    let slot = match kind {
        ContentKind::Article => &mut profile.average_completion_time.articles,
        ContentKind::Tutorial => &mut profile.average_completion_time.tutorials,
        // Paths aggregate other items; their duration is not averaged.
        ContentKind::Path => return,
    };
    *slot = Some(match *slot {
        Some(old) => (1.0 - EMA_ALPHA) * old + EMA_ALPHA * minutes_spent,
        None => minutes_spent,
    });
}

/// Activity tags form the front block (existing entries move, new ones
/// enter, nothing duplicates); surviving interests keep relative order;
/// the least-recent tail drops past the cap.
fn merge_interests(interests: &[String], tags: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(interests.len() + tags.len());
    for tag in tags {
        if !tag.is_empty() && !merged.iter().any(|t| t == tag) {
            merged.push(tag.clone());
        }
    }
    for tag in interests {
        if !merged.iter().any(|t| t == tag) {
            merged.push(tag.clone());
        }
    }
    merged.truncate(MAX_INTERESTS);
    merged
}
