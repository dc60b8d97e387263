//! Tuning knobs for a ranking call.

use serde::{Deserialize, Serialize};

/// Default cap on returned recommendations per kind.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default strength of the diversity re-ranking pass.
pub const DEFAULT_DIVERSITY_FACTOR: f64 = 0.3;

/// Configuration for a single ranking call.
///
/// These are tuning knobs, not correctness-critical inputs: out-of-range
/// values are clamped to sane defaults rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationOptions {
    /// Include items the user has already completed.
    pub include_completed: bool,
    /// Maximum number of recommendations returned per kind.
    pub max_results: usize,
    /// Drop recommendations below this confidence (0 disables the filter).
    pub min_confidence: f64,
    /// Available minutes; longer items are down-weighted, never excluded.
    pub time_constraint: Option<u32>,
    /// 0 = pure score order, 1 = strongly favor tag variety.
    pub diversity_factor: f64,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            include_completed: false,
            max_results: DEFAULT_MAX_RESULTS,
            min_confidence: 0.0,
            time_constraint: None,
            diversity_factor: DEFAULT_DIVERSITY_FACTOR,
        }
    }
}

impl RecommendationOptions {
    /// Include already-completed items as candidates.
    #[must_use]
    pub fn with_completed(mut self) -> Self {
        self.include_completed = true;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Set the available time window in minutes.
    #[must_use]
    pub fn with_time_constraint(mut self, minutes: u32) -> Self {
        self.time_constraint = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_diversity_factor(mut self, factor: f64) -> Self {
        self.diversity_factor = factor;
        self
    }

    /// Copy with every knob forced into its valid range.
    ///
    /// Non-finite numbers fall back to defaults; a non-positive time
    /// constraint means no constraint.
    pub(crate) fn clamped(&self) -> Self {
        let min_confidence = if self.min_confidence.is_finite() {
            self.min_confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let diversity_factor = if self.diversity_factor.is_finite() {
            self.diversity_factor.clamp(0.0, 1.0)
        } else {
            DEFAULT_DIVERSITY_FACTOR
        };
        Self {
            include_completed: self.include_completed,
            max_results: self.max_results,
            min_confidence,
            time_constraint: self.time_constraint.filter(|&m| m > 0),
            diversity_factor,
        }
    }
}
