//! Reduction of per-frame scores to a single confidence and verdict.

use crate::FrameScore;

/// Confidence strictly above this value is reported as AI-generated.
pub const DETECTION_THRESHOLD: f64 = 0.5;

/// Result of reducing a set of scores.
#[derive(Debug, Clone, Copy, PartialEq, derive_getters::Getters)]
pub struct Aggregation {
    /// Mean of the rated frames, or `0` when none were rated
    confidence: f64,
    /// `confidence > DETECTION_THRESHOLD`
    is_fake: bool,
}

impl Aggregation {
    /// Classify a single confidence value.
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_core::Aggregation;
    ///
    /// assert!(!Aggregation::from_confidence(0.5).is_fake());
    /// assert!(Aggregation::from_confidence(0.51).is_fake());
    /// ```
    pub fn from_confidence(confidence: f64) -> Self {
        Self {
            confidence,
            is_fake: confidence > DETECTION_THRESHOLD,
        }
    }
}

/// Average the rated frames of a video.
///
/// Frames scored exactly `0` are treated as abstentions and excluded before
/// averaging. An empty or all-abstention sequence yields confidence `0`.
///
/// # Examples
///
/// ```
/// use veracity_core::{aggregate, FrameScore};
///
/// let scores = [FrameScore::new(0.9), FrameScore::new(0.0), FrameScore::new(0.7)];
/// let result = aggregate(&scores);
/// assert!((result.confidence() - 0.8).abs() < 1e-9);
/// assert!(*result.is_fake());
/// ```
pub fn aggregate(scores: &[FrameScore]) -> Aggregation {
    let rated: Vec<f64> = scores
        .iter()
        .filter(|score| !score.is_abstention())
        .map(FrameScore::value)
        .collect();

    let confidence = if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    };

    Aggregation::from_confidence(confidence)
}
