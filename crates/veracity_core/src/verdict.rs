//! The normalized verdict returned to clients.

use crate::{Aggregation, FrameScore, aggregate};
use serde::{Deserialize, Serialize};

/// Note attached to fake video verdicts.
const VIDEO_ARTIFACT: &str = "AI-generated video patterns detected";
const HIGH_CONFIDENCE_ARTIFACT: &str = "High confidence AI generation detected";
const MODERATE_ARTIFACT: &str = "Moderate AI generation indicators";

/// How a video reached the relay.
///
/// Client uploads get an extra sentence in their reasoning text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoSource {
    /// Bytes uploaded by the client
    Upload,
    /// Fetched from a (possibly resolved) URL
    Url,
}

/// Single-asset score as reported by the detection service.
#[derive(Debug, Clone, PartialEq, Default, derive_getters::Getters)]
pub struct ImageScore {
    /// Probability the image is synthetic
    score: FrameScore,
    /// Generator class label, when the service offers one
    ai_class: Option<String>,
}

impl ImageScore {
    /// Create a single-asset score.
    pub fn new(score: impl Into<FrameScore>, ai_class: Option<String>) -> Self {
        Self {
            score: score.into(),
            ai_class,
        }
    }
}

/// Uniform verdict for any analysed media.
///
/// Field names serialize exactly as clients expect them
/// (`is_likely_ai_generated`, `confidence_score`, `reasoning`,
/// `potential_artifacts`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Verdict {
    /// Whether the media is judged synthetic
    is_likely_ai_generated: bool,
    /// Confidence in `[0, 1]` that the media is synthetic
    confidence_score: f64,
    /// Human-readable explanation
    reasoning: String,
    /// Ordered annotations about detected artifacts
    potential_artifacts: Vec<String>,
}

impl Verdict {
    /// Build a video verdict from per-frame scores.
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_core::{FrameScore, Verdict, VideoSource};
    ///
    /// let verdict = Verdict::from_frames(&[FrameScore::new(0.9), FrameScore::new(0.7)], VideoSource::Url);
    /// assert!(*verdict.is_likely_ai_generated());
    /// assert_eq!(verdict.potential_artifacts(), &["AI-generated video patterns detected"]);
    /// ```
    pub fn from_frames(scores: &[FrameScore], source: VideoSource) -> Self {
        let aggregation = aggregate(scores);
        let confidence = *aggregation.confidence();
        let is_fake = *aggregation.is_fake();

        let mut reasoning = if is_fake {
            format!(
                "Video analysis detected this as likely AI-generated with {} confidence.",
                percent(confidence)
            )
        } else {
            format!(
                "Video analysis detected this as likely authentic with {} confidence.",
                percent(1.0 - confidence)
            )
        };
        if source == VideoSource::Upload {
            reasoning.push_str(if is_fake {
                " The video shows characteristics typical of synthetic media."
            } else {
                " No significant AI generation indicators detected."
            });
        }

        let potential_artifacts = if is_fake {
            vec![VIDEO_ARTIFACT.to_string()]
        } else {
            Vec::new()
        };

        Self {
            is_likely_ai_generated: is_fake,
            confidence_score: confidence,
            reasoning,
            potential_artifacts,
        }
    }

    /// Build an image verdict from a single-asset score.
    ///
    /// The raw score is used directly, including `0`. Artifacts always carry
    /// the class label when present, then at most one confidence tier note.
    pub fn from_image(image: &ImageScore) -> Self {
        let aggregation = Aggregation::from_confidence(image.score().value());
        let confidence = *aggregation.confidence();
        let is_fake = *aggregation.is_fake();

        let mut potential_artifacts = Vec::new();
        if let Some(class) = image.ai_class() {
            potential_artifacts.push(format!("AI class: {}", class));
        }
        if is_fake && confidence > 0.8 {
            potential_artifacts.push(HIGH_CONFIDENCE_ARTIFACT.to_string());
        } else if is_fake && confidence > 0.6 {
            potential_artifacts.push(MODERATE_ARTIFACT.to_string());
        }

        let reasoning = if is_fake {
            format!(
                "Sightengine AI detection model identified this as likely AI-generated with {} confidence. The image shows characteristics typical of synthetic media.",
                percent(confidence)
            )
        } else {
            format!(
                "Sightengine AI detection model identified this as likely authentic with {} confidence. No significant AI generation indicators detected.",
                percent(1.0 - confidence)
            )
        };

        Self {
            is_likely_ai_generated: is_fake,
            confidence_score: confidence,
            reasoning,
            potential_artifacts,
        }
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
