//! Detection API configuration.

use veracity_error::ConfigError;

/// Credentials and location of the detection API.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ScoringConfig {
    /// API user
    pub api_user: String,
    /// API secret
    pub api_secret: String,
    /// Base URL (e.g., "https://api.sightengine.com/1.0")
    pub base_url: String,
    /// Model list sent with every request
    pub models: String,
}

impl std::fmt::Debug for ScoringConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringConfig")
            .field("api_user", &self.api_user)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("models", &self.models)
            .finish()
    }
}

impl ScoringConfig {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.sightengine.com/1.0";
    /// Detection model requested from the service.
    pub const GENAI_MODEL: &'static str = "genai";

    /// Create a configuration against the default endpoint.
    pub fn new(api_user: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_user: api_user.into(),
            api_secret: api_secret.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            models: Self::GENAI_MODEL.to_string(),
        }
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `SIGHTENGINE_API_USER` (required)
    /// - `SIGHTENGINE_API_SECRET` (required)
    /// - `SIGHTENGINE_BASE_URL` (default: "https://api.sightengine.com/1.0")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_user = std::env::var("SIGHTENGINE_API_USER").ok().filter(|v| !v.is_empty());
        let api_secret = std::env::var("SIGHTENGINE_API_SECRET")
            .ok()
            .filter(|v| !v.is_empty());

        let (Some(api_user), Some(api_secret)) = (api_user, api_secret) else {
            return Err(ConfigError::new("Sightengine API credentials not configured"));
        };

        let mut config = Self::new(api_user, api_secret);
        if let Ok(base_url) = std::env::var("SIGHTENGINE_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }
}
