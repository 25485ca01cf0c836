//! Flow orchestration.

use crate::stage::bounded;
use crate::{MediaFetcher, PipelineConfig, PipelineStage, decode_image};
use bytes::Bytes;
use futures::Stream;
use std::sync::Arc;
use tracing::{info, instrument};
use veracity_core::{MediaKind, MediaReference, Verdict, VideoSource};
use veracity_error::{
    ResolutionError, ValidationError, VeracityError, VeracityErrorKind, VeracityResult,
};
use veracity_resolver::{Platform, PlatformResolver};
use veracity_scoring::MediaScorer;
use veracity_storage::{ObjectStage, RemoteObject, StagedFile, StagingStore};

/// Extension given to videos downloaded from a URL.
const DOWNLOAD_EXTENSION: &str = "mp4";

/// Orchestrates the analysis flows over injected collaborators.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use veracity_pipeline::{AnalysisPipelineBuilder, HttpFetcher, PipelineConfig};
/// use veracity_resolver::PlatformResolver;
/// use veracity_scoring::{ScoringConfig, SightengineClient};
/// use veracity_storage::{CloudinaryStage, ObjectStageConfig, StagingStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = reqwest::Client::new();
/// let pipeline = AnalysisPipelineBuilder::default()
///     .resolver(PlatformResolver::builder().build())
///     .fetcher(Arc::new(HttpFetcher::new(client.clone())))
///     .staging(Arc::new(StagingStore::new("uploads")?))
///     .object_stage(Arc::new(CloudinaryStage::new(ObjectStageConfig::from_env()?, client.clone())))
///     .scorer(Arc::new(SightengineClient::new(ScoringConfig::from_env()?, client)))
///     .config(PipelineConfig::default())
///     .build()?;
///
/// let verdict = pipeline.analyze_url(Some("https://cdn.example.com/clip.mp4")).await?;
/// println!("{}", verdict.reasoning());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct AnalysisPipeline {
    /// Platform URL resolver
    resolver: PlatformResolver,
    /// Downloader for resolved URLs
    fetcher: Arc<dyn MediaFetcher>,
    /// Local staging directory
    staging: Arc<StagingStore>,
    /// Remote object stage
    object_stage: Arc<dyn ObjectStage>,
    /// Detection service client
    scorer: Arc<dyn MediaScorer>,
    /// Stage timeouts
    #[builder(default)]
    config: PipelineConfig,
}

impl AnalysisPipeline {
    /// Stage timeouts in effect.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Local staging store.
    pub fn staging(&self) -> &StagingStore {
        &self.staging
    }

    /// Analyze a video referenced by URL.
    ///
    /// Platform links are resolved to a direct URL first; the media is then
    /// downloaded, staged, uploaded and scored frame by frame.
    ///
    /// # Errors
    ///
    /// - `ValidationError` when `video_url` is absent or empty (no external
    ///   call is made)
    /// - `ResolutionError` when a platform link cannot be resolved
    /// - `TransferError` when the download or upload fails
    /// - `StorageError` when the local copy cannot be written
    /// - `ScoringError` when the detection service fails
    #[instrument(skip(self), fields(platform = tracing::field::Empty))]
    pub async fn analyze_url(&self, video_url: Option<&str>) -> VeracityResult<Verdict> {
        let video_url = video_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ValidationError::new("Missing video URL"))?;

        let platform = Platform::detect(video_url);
        tracing::Span::current().record("platform", tracing::field::display(platform));

        let resolved = bounded(PipelineStage::Resolving, self.config.resolve_timeout, async {
            self.resolver
                .resolve(video_url)
                .await
                .map_err(VeracityError::from)
        })
        .await;
        // Social links only ever surface their platform's fallback message.
        let direct_url = match resolved {
            Err(e)
                if platform != Platform::Direct
                    && matches!(e.kind(), VeracityErrorKind::Resolution(_)) =>
            {
                return Err(ResolutionError::platform(&platform.to_string()).into());
            }
            other => other?,
        };
        info!(%direct_url, "Resolved video URL");

        let staged = bounded(
            PipelineStage::Downloading,
            self.config.download_timeout,
            self.download(&direct_url),
        )
        .await?;

        self.stage_and_score(staged, VideoSource::Url).await
    }

    /// Analyze a video whose bytes arrive as a stream (client upload).
    #[instrument(skip(self, chunks))]
    pub async fn analyze_upload<S>(&self, chunks: S, extension: &str) -> VeracityResult<Verdict>
    where
        S: Stream<Item = VeracityResult<Bytes>> + Send,
    {
        let staged = self.staging.store(chunks, extension).await?;
        self.stage_and_score(staged, VideoSource::Upload).await
    }

    /// Analyze a base64-encoded image in single-asset mode.
    ///
    /// # Errors
    ///
    /// `ValidationError("Missing base64 or mimeType")` when either field is
    /// absent or empty; `ValidationError` for undecodable data; otherwise the
    /// scorer's error.
    #[instrument(skip(self, base64))]
    pub async fn analyze_image(
        &self,
        base64: Option<&str>,
        mime_type: Option<&str>,
    ) -> VeracityResult<Verdict> {
        let (Some(encoded), Some(mime_type)) = (
            base64.filter(|value| !value.is_empty()),
            mime_type.filter(|value| !value.is_empty()),
        ) else {
            return Err(ValidationError::new("Missing base64 or mimeType").into());
        };

        let data = decode_image(encoded)?;
        info!(size = data.len(), "Decoded image");

        self.analyze(MediaReference::Bytes {
            data,
            mime_type: mime_type.to_string(),
        })
        .await
    }

    /// Analyze a client-supplied media reference.
    ///
    /// URLs take the video URL flow; raw bytes are scored in single-asset mode.
    pub async fn analyze(&self, reference: MediaReference) -> VeracityResult<Verdict> {
        match reference {
            MediaReference::Url(url) => self.analyze_url(Some(&url)).await,
            MediaReference::Bytes { data, mime_type } => self.score_image(data, &mime_type).await,
        }
    }

    async fn score_image(&self, data: Vec<u8>, mime_type: &str) -> VeracityResult<Verdict> {
        let score = bounded(
            PipelineStage::Scoring,
            self.config.scoring_timeout,
            self.scorer.score_image(data, mime_type),
        )
        .await?;

        let verdict = Verdict::from_image(&score);
        info!(
            confidence = *verdict.confidence_score(),
            is_fake = *verdict.is_likely_ai_generated(),
            "Image analysis complete"
        );
        Ok(verdict)
    }

    async fn download(&self, url: &str) -> VeracityResult<StagedFile> {
        let media = self.fetcher.fetch(url).await?;
        self.staging.store(media.into_body(), DOWNLOAD_EXTENSION).await
    }

    async fn stage_and_score(
        &self,
        mut staged: StagedFile,
        source: VideoSource,
    ) -> VeracityResult<Verdict> {
        let uploaded = bounded(
            PipelineStage::Uploading,
            self.config.upload_timeout,
            self.object_stage.upload(&staged, MediaKind::Video),
        )
        .await;

        // The local copy is not needed once the upload attempt is over.
        staged.release().await;

        let remote = RemoteObject::new(
            uploaded?,
            self.object_stage.clone(),
            self.config.cleanup_timeout,
        );
        info!(url = %remote.url(), "Video staged remotely");

        let scored = bounded(
            PipelineStage::Scoring,
            self.config.scoring_timeout,
            self.scorer.score_video_url(remote.url()),
        )
        .await;

        remote.release().await;
        let frames = scored?;

        let verdict = Verdict::from_frames(&frames, source);
        info!(
            frames = frames.len(),
            confidence = *verdict.confidence_score(),
            is_fake = *verdict.is_likely_ai_generated(),
            "Video analysis complete"
        );
        Ok(verdict)
    }
}
