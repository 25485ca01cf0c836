use crate::{DetectionResponse, ScoringConfig};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::instrument;
use veracity_core::{FrameScore, ImageScore};
use veracity_error::{ScoringError, ScoringErrorKind, VeracityResult};

/// Remote synthetic-media scoring.
#[async_trait]
pub trait MediaScorer: Send + Sync {
    /// Score raw image bytes (single-asset mode).
    async fn score_image(&self, data: Vec<u8>, mime_type: &str) -> VeracityResult<ImageScore>;

    /// Score a video by fetch URL (streaming-URL mode).
    async fn score_video_url(&self, stream_url: &str) -> VeracityResult<Vec<FrameScore>>;
}

/// Client for a Sightengine-compatible detection API
#[derive(Debug, Clone)]
pub struct SightengineClient {
    config: ScoringConfig,
    client: reqwest::Client,
}

impl SightengineClient {
    /// Create a new scoring client
    #[instrument(skip_all, fields(base_url = %config.base_url))]
    pub fn new(config: ScoringConfig, client: reqwest::Client) -> Self {
        tracing::debug!("Creating scoring client");
        Self { config, client }
    }

    /// Get the scoring configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    fn credentials(&self, form: Form) -> Form {
        form.text("models", self.config.models.clone())
            .text("api_user", self.config.api_user.clone())
            .text("api_secret", self.config.api_secret.clone())
    }

    async fn submit(&self, path: &str, form: Form) -> Result<DetectionResponse, ScoringError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!("Submitting to {}", url);

        let response = self.client.post(&url).multipart(form).send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            ScoringError::new(ScoringErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ScoringError::new(ScoringErrorKind::Http(format!(
                "Failed to read response: {}",
                e
            )))
        })?;

        let body: DetectionResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(status = %status, "Failed to parse response: {}", e);
            ScoringError::new(ScoringErrorKind::Deserialization(format!(
                "status {}: {}",
                status, e
            )))
        })?;

        tracing::debug!(status = %status, result = %body.status(), "Detection API responded");
        Ok(body)
    }
}

#[async_trait]
impl MediaScorer for SightengineClient {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn score_image(&self, data: Vec<u8>, mime_type: &str) -> VeracityResult<ImageScore> {
        let part = Part::bytes(data)
            .file_name("image.jpg")
            .mime_str(mime_type)
            .map_err(|e| {
                ScoringError::new(ScoringErrorKind::Http(format!(
                    "Invalid mime type {}: {}",
                    mime_type, e
                )))
            })?;
        let form = self.credentials(Form::new().part("media", part));

        let score = self.submit("check.json", form).await?.into_image_score()?;
        tracing::info!(score = score.score().value(), "Scored image");
        Ok(score)
    }

    #[instrument(skip(self))]
    async fn score_video_url(&self, stream_url: &str) -> VeracityResult<Vec<FrameScore>> {
        let form = self.credentials(Form::new().text("stream_url", stream_url.to_string()));

        let frames = self
            .submit("video/check-sync.json", form)
            .await?
            .into_frame_scores()?;
        tracing::info!(frames = frames.len(), "Scored video frames");
        Ok(frames)
    }
}
