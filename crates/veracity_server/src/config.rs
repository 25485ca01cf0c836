//! Service configuration, validated once at startup.

use std::path::PathBuf;
use veracity_error::ConfigError;
use veracity_pipeline::PipelineConfig;
use veracity_resolver::ExtractorConfig;
use veracity_scoring::ScoringConfig;
use veracity_storage::ObjectStageConfig;

/// Listener and request-body settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Local staging directory
    pub upload_dir: PathBuf,
    /// Upper bound for JSON and multipart request bodies
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3002,
            upload_dir: PathBuf::from("uploads"),
            max_body_bytes: 50 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `HOST` (default: "0.0.0.0")
    /// - `PORT` (default: 3002)
    /// - `UPLOAD_DIR` (default: "uploads")
    /// - `MAX_BODY_BYTES` (default: 50 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT", defaults.port)?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_body_bytes: parse_env("MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::new(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

/// Configuration of every component, assembled from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listener settings
    pub server: ServerConfig,
    /// Detection API credentials
    pub scoring: ScoringConfig,
    /// Remote object stage credentials
    pub object_stage: ObjectStageConfig,
    /// Platform extractor endpoints
    pub extractors: ExtractorConfig,
    /// Stage timeouts
    pub pipeline: PipelineConfig,
}

impl ServiceConfig {
    /// Load and validate all configuration.
    ///
    /// Fails on the first missing credential or malformed value, before any
    /// external call is made.
    #[tracing::instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            server: ServerConfig::from_env()?,
            scoring: ScoringConfig::from_env()?,
            object_stage: ObjectStageConfig::from_env()?,
            extractors: ExtractorConfig::from_env(),
            pipeline: PipelineConfig::from_env()?,
        };
        tracing::debug!(?config, "Loaded service configuration");
        Ok(config)
    }
}
