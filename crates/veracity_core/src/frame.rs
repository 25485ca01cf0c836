//! Per-frame synthetic-media scores.

use serde::{Deserialize, Serialize};

/// Probability in `[0, 1]` that a single frame (or image) is synthetic.
///
/// A score of exactly `0` is how the detection service reports a frame it
/// did not rate; the video aggregation drops those.
///
/// # Examples
///
/// ```
/// use veracity_core::FrameScore;
///
/// let score = FrameScore::new(0.9);
/// assert_eq!(score.value(), 0.9);
/// assert!(!score.is_abstention());
/// assert!(FrameScore::new(0.0).is_abstention());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, derive_more::From,
)]
#[serde(transparent)]
pub struct FrameScore(f64);

impl FrameScore {
    /// Wrap a raw probability.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw probability.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether the service abstained on this frame.
    pub fn is_abstention(&self) -> bool {
        self.0 <= 0.0 || self.0.is_nan()
    }
}
