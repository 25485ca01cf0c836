//! Extractor endpoint configuration.

/// Endpoints of the platform extractors. Unset platforms always fail to
/// resolve with their fallback message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExtractorConfig {
    /// Instagram extractor endpoint
    pub instagram_url: Option<String>,
    /// Facebook extractor endpoint
    pub facebook_url: Option<String>,
    /// TikTok extractor endpoint
    pub tiktok_url: Option<String>,
}

impl ExtractorConfig {
    /// Create config from environment variables
    ///
    /// Reads (all optional):
    /// - `INSTAGRAM_EXTRACTOR_URL`
    /// - `FACEBOOK_EXTRACTOR_URL`
    /// - `TIKTOK_EXTRACTOR_URL`
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());
        Self {
            instagram_url: var("INSTAGRAM_EXTRACTOR_URL"),
            facebook_url: var("FACEBOOK_EXTRACTOR_URL"),
            tiktok_url: var("TIKTOK_EXTRACTOR_URL"),
        }
    }
}
