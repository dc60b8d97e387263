//! Common types shared across the recommendation modules.

use serde::{Deserialize, Serialize};

/// Evidence strength behind a recommendation, clamped to [0.0, 1.0].
///
/// Confidence is independent of score magnitude: it reflects how much
/// evidence backed a pick, not how high the pick scored. The newtype
/// clamps on construction so downstream code never sees an out-of-range
/// value.
///
/// # Examples
///
/// ```
/// use pathwise_recommend::Confidence;
///
/// let c = Confidence::new(0.75);
/// assert_eq!(c.value(), 0.75);
///
/// // Out-of-range input is clamped, not rejected.
/// assert_eq!(Confidence::new(1.7).value(), 1.0);
/// assert_eq!(Confidence::new(-0.2).value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a new confidence value, clamping into [0.0, 1.0].
    ///
    /// Non-finite input collapses to zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// The inner value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Zero confidence.
    #[must_use]
    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
