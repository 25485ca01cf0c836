//! Per-platform resolution strategies.

use crate::{Extractor, FacebookPayload, InstagramPayload, Platform, TikTokPayload};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use veracity_error::ResolutionError;

/// Resolves a URL of one platform to a direct media URL.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Resolve `url`.
    async fn resolve(&self, url: &str) -> Result<String, ResolutionError>;
}

/// Passes the URL through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectStrategy;

#[async_trait]
impl ResolveStrategy for DirectStrategy {
    async fn resolve(&self, url: &str) -> Result<String, ResolutionError> {
        debug!("Assuming direct video URL");
        Ok(url.to_string())
    }
}

/// Run an extractor and pick the URL out of its payload.
///
/// Any failure, including the extractor's own error, collapses into the
/// platform fallback message.
async fn extract_with<P>(
    platform: Platform,
    extractor: Option<&Arc<dyn Extractor<P>>>,
    url: &str,
    pick: impl FnOnce(&P) -> Option<&str>,
) -> Result<String, ResolutionError> {
    let Some(extractor) = extractor else {
        warn!(%platform, "No extractor configured for platform");
        return Err(ResolutionError::platform(&platform.to_string()));
    };

    match extractor.extract(url).await {
        Ok(payload) => match pick(&payload) {
            Some(video_url) => {
                info!(%platform, "Extracted video URL");
                Ok(video_url.to_string())
            }
            None => {
                warn!(%platform, "Extractor payload carried no usable video URL");
                Err(ResolutionError::platform(&platform.to_string()))
            }
        },
        Err(e) => {
            warn!(%platform, error = %e, "Extraction failed");
            Err(ResolutionError::platform(&platform.to_string()))
        }
    }
}

/// Instagram posts and reels.
#[derive(Clone, Default)]
pub struct InstagramStrategy {
    extractor: Option<Arc<dyn Extractor<InstagramPayload>>>,
}

impl InstagramStrategy {
    /// Create a strategy; `None` always fails with the fallback message.
    pub fn new(extractor: Option<Arc<dyn Extractor<InstagramPayload>>>) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl ResolveStrategy for InstagramStrategy {
    #[instrument(skip(self, url))]
    async fn resolve(&self, url: &str) -> Result<String, ResolutionError> {
        extract_with(
            Platform::Instagram,
            self.extractor.as_ref(),
            url,
            InstagramPayload::video_url,
        )
        .await
    }
}

/// Facebook videos, including fb.watch short links.
#[derive(Clone, Default)]
pub struct FacebookStrategy {
    extractor: Option<Arc<dyn Extractor<FacebookPayload>>>,
}

impl FacebookStrategy {
    /// Create a strategy; `None` always fails with the fallback message.
    pub fn new(extractor: Option<Arc<dyn Extractor<FacebookPayload>>>) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl ResolveStrategy for FacebookStrategy {
    #[instrument(skip(self, url))]
    async fn resolve(&self, url: &str) -> Result<String, ResolutionError> {
        extract_with(
            Platform::Facebook,
            self.extractor.as_ref(),
            url,
            FacebookPayload::video_url,
        )
        .await
    }
}

/// TikTok videos.
#[derive(Clone, Default)]
pub struct TikTokStrategy {
    extractor: Option<Arc<dyn Extractor<TikTokPayload>>>,
}

impl TikTokStrategy {
    /// Create a strategy; `None` always fails with the fallback message.
    pub fn new(extractor: Option<Arc<dyn Extractor<TikTokPayload>>>) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl ResolveStrategy for TikTokStrategy {
    #[instrument(skip(self, url))]
    async fn resolve(&self, url: &str) -> Result<String, ResolutionError> {
        extract_with(
            Platform::TikTok,
            self.extractor.as_ref(),
            url,
            TikTokPayload::video_url,
        )
        .await
    }
}
