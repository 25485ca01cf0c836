//! Wire format of the detection API.

use serde::{Deserialize, Serialize};
use veracity_core::{FrameScore, ImageScore};
use veracity_error::{ScoringError, ScoringErrorKind};

/// Top-level detection response, shared by both endpoints.
///
/// Single-asset: `{ "status": "success", "type": { "ai_generated": 0.93, "ai_class": "..." } }`
///
/// Video: `{ "status": "success", "data": { "frames": [ { "type": { "ai_generated": 0.4 } } ] } }`
///
/// Failure: `{ "status": "failure", "error": { "message": "..." } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct DetectionResponse {
    /// `"success"` or `"failure"`
    #[serde(default)]
    status: String,
    /// Failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ApiErrorBody>,
    /// Single-asset scores
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    scores: Option<TypeScores>,
    /// Video frame data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<VideoData>,
}

/// Failure detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ApiErrorBody {
    /// Human-readable failure message
    #[serde(default)]
    message: Option<String>,
}

/// Per-asset or per-frame scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TypeScores {
    /// Probability the media is AI-generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ai_generated: Option<f64>,
    /// Generator class label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ai_class: Option<String>,
}

impl TypeScores {
    /// Create scores.
    pub fn new(ai_generated: Option<f64>, ai_class: Option<String>) -> Self {
        Self {
            ai_generated,
            ai_class,
        }
    }
}

/// Video analysis body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct VideoData {
    /// Sampled frames in order; absent when the service produced none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frames: Option<Vec<FrameEntry>>,
}

/// One sampled frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FrameEntry {
    /// Frame scores
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    scores: Option<TypeScores>,
}

impl FrameEntry {
    /// Frame with the given AI score.
    pub fn with_score(ai_generated: f64) -> Self {
        Self {
            scores: Some(TypeScores::new(Some(ai_generated), None)),
        }
    }
}

impl DetectionResponse {
    /// Successful single-asset response.
    pub fn image(ai_generated: f64, ai_class: Option<String>) -> Self {
        Self {
            status: "success".to_string(),
            scores: Some(TypeScores::new(Some(ai_generated), ai_class)),
            ..Default::default()
        }
    }

    /// Successful video response. `None` omits `data.frames` entirely.
    pub fn video(frames: Option<Vec<FrameEntry>>) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(VideoData { frames }),
            ..Default::default()
        }
    }

    /// Failure response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "failure".to_string(),
            error: Some(ApiErrorBody {
                message: Some(message.into()),
            }),
            ..Default::default()
        }
    }

    fn check_status(&self, default_message: &str) -> Result<(), ScoringError> {
        if self.status == "failure" {
            let message = self
                .error
                .as_ref()
                .and_then(|error| error.message.clone())
                .unwrap_or_else(|| default_message.to_string());
            return Err(ScoringError::new(ScoringErrorKind::Api(message)));
        }
        Ok(())
    }

    /// Interpret as a single-asset result. A missing score reads as `0`.
    pub fn into_image_score(self) -> Result<ImageScore, ScoringError> {
        self.check_status("API request failed")?;
        let scores = self.scores.unwrap_or_default();
        Ok(ImageScore::new(
            scores.ai_generated.unwrap_or(0.0),
            scores.ai_class,
        ))
    }

    /// Interpret as a video result.
    ///
    /// A response without `data.frames` is an error; an empty frame list is
    /// not. Frames without a score read as `0` (abstention).
    pub fn into_frame_scores(self) -> Result<Vec<FrameScore>, ScoringError> {
        self.check_status("Video analysis failed")?;
        let frames = self
            .data
            .and_then(|data| data.frames)
            .ok_or_else(|| ScoringError::new(ScoringErrorKind::MissingFrames))?;

        Ok(frames
            .into_iter()
            .map(|frame| {
                FrameScore::new(
                    frame
                        .scores
                        .and_then(|scores| scores.ai_generated)
                        .unwrap_or(0.0),
                )
            })
            .collect())
    }
}
