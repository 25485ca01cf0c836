//! Platform dispatch.

use crate::{
    DirectStrategy, Extractor, ExtractorConfig, FacebookPayload, FacebookStrategy, HttpExtractor,
    InstagramPayload, InstagramStrategy, Platform, ResolveStrategy, TikTokPayload, TikTokStrategy,
};
use std::sync::Arc;
use tracing::{info, instrument};
use veracity_error::ResolutionError;

/// Maps any input URL to a directly downloadable media URL.
#[derive(Clone)]
pub struct PlatformResolver {
    instagram: Arc<dyn ResolveStrategy>,
    facebook: Arc<dyn ResolveStrategy>,
    tiktok: Arc<dyn ResolveStrategy>,
    direct: Arc<dyn ResolveStrategy>,
}

impl PlatformResolver {
    /// Start building a resolver. Unset strategies fall back to unconfigured
    /// platform strategies (always failing) and the pass-through direct strategy.
    pub fn builder() -> PlatformResolverBuilder {
        PlatformResolverBuilder::default()
    }

    /// Build a resolver whose platform strategies call HTTP extractors.
    pub fn from_config(config: &ExtractorConfig, client: reqwest::Client) -> Self {
        let mut builder = Self::builder();
        if let Some(endpoint) = &config.instagram_url {
            let extractor: Arc<dyn Extractor<InstagramPayload>> =
                Arc::new(HttpExtractor::<InstagramPayload>::new(client.clone(), endpoint.clone()));
            builder = builder.instagram(InstagramStrategy::new(Some(extractor)));
        }
        if let Some(endpoint) = &config.facebook_url {
            let extractor: Arc<dyn Extractor<FacebookPayload>> =
                Arc::new(HttpExtractor::<FacebookPayload>::new(client.clone(), endpoint.clone()));
            builder = builder.facebook(FacebookStrategy::new(Some(extractor)));
        }
        if let Some(endpoint) = &config.tiktok_url {
            let extractor: Arc<dyn Extractor<TikTokPayload>> =
                Arc::new(HttpExtractor::<TikTokPayload>::new(client, endpoint.clone()));
            builder = builder.tiktok(TikTokStrategy::new(Some(extractor)));
        }
        builder.build()
    }

    /// The strategy that handles `platform`.
    pub fn strategy_for(&self, platform: Platform) -> &Arc<dyn ResolveStrategy> {
        match platform {
            Platform::Instagram => &self.instagram,
            Platform::Facebook => &self.facebook,
            Platform::TikTok => &self.tiktok,
            Platform::Direct => &self.direct,
        }
    }

    /// Resolve `url` using the strategy of its detected platform.
    #[instrument(skip(self))]
    pub async fn resolve(&self, url: &str) -> Result<String, ResolutionError> {
        let platform = Platform::detect(url);
        info!(%platform, "Resolving media URL");
        self.strategy_for(platform).resolve(url).await
    }
}

/// Builder for [`PlatformResolver`].
#[derive(Default)]
pub struct PlatformResolverBuilder {
    instagram: Option<Arc<dyn ResolveStrategy>>,
    facebook: Option<Arc<dyn ResolveStrategy>>,
    tiktok: Option<Arc<dyn ResolveStrategy>>,
    direct: Option<Arc<dyn ResolveStrategy>>,
}

impl PlatformResolverBuilder {
    /// Strategy for Instagram URLs.
    pub fn instagram(mut self, strategy: impl ResolveStrategy + 'static) -> Self {
        self.instagram = Some(Arc::new(strategy));
        self
    }

    /// Strategy for Facebook URLs.
    pub fn facebook(mut self, strategy: impl ResolveStrategy + 'static) -> Self {
        self.facebook = Some(Arc::new(strategy));
        self
    }

    /// Strategy for TikTok URLs.
    pub fn tiktok(mut self, strategy: impl ResolveStrategy + 'static) -> Self {
        self.tiktok = Some(Arc::new(strategy));
        self
    }

    /// Strategy for all other URLs.
    pub fn direct(mut self, strategy: impl ResolveStrategy + 'static) -> Self {
        self.direct = Some(Arc::new(strategy));
        self
    }

    /// Finish the resolver.
    pub fn build(self) -> PlatformResolver {
        PlatformResolver {
            instagram: self
                .instagram
                .unwrap_or_else(|| Arc::new(InstagramStrategy::default())),
            facebook: self
                .facebook
                .unwrap_or_else(|| Arc::new(FacebookStrategy::default())),
            tiktok: self
                .tiktok
                .unwrap_or_else(|| Arc::new(TikTokStrategy::default())),
            direct: self.direct.unwrap_or_else(|| Arc::new(DirectStrategy)),
        }
    }
}
