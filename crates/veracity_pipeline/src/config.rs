//! Pipeline stage bounds.

use std::time::Duration;
use veracity_error::ConfigError;

/// Timeouts applied to each pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineConfig {
    /// Platform URL resolution
    pub resolve_timeout: Duration,
    /// Download of the resolved URL into local staging
    pub download_timeout: Duration,
    /// Upload of the staged file to the remote object stage
    pub upload_timeout: Duration,
    /// Remote scoring call
    pub scoring_timeout: Duration,
    /// Remote object delete, retries included
    pub cleanup_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resolve_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(120),
            upload_timeout: Duration::from_secs(120),
            scoring_timeout: Duration::from_secs(90),
            cleanup_timeout: Duration::from_secs(15),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables
    ///
    /// Reads (whole seconds, defaults in parentheses):
    /// - `RESOLVE_TIMEOUT_SECS` (30)
    /// - `DOWNLOAD_TIMEOUT_SECS` (120)
    /// - `UPLOAD_TIMEOUT_SECS` (120)
    /// - `SCORING_TIMEOUT_SECS` (90)
    /// - `CLEANUP_TIMEOUT_SECS` (15)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            resolve_timeout: secs_from_env("RESOLVE_TIMEOUT_SECS", defaults.resolve_timeout)?,
            download_timeout: secs_from_env("DOWNLOAD_TIMEOUT_SECS", defaults.download_timeout)?,
            upload_timeout: secs_from_env("UPLOAD_TIMEOUT_SECS", defaults.upload_timeout)?,
            scoring_timeout: secs_from_env("SCORING_TIMEOUT_SECS", defaults.scoring_timeout)?,
            cleanup_timeout: secs_from_env("CLEANUP_TIMEOUT_SECS", defaults.cleanup_timeout)?,
        })
    }
}

fn secs_from_env(name: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
            ConfigError::new(format!(
                "{} must be a whole number of seconds, got {:?}",
                name, raw
            ))
        }),
        Err(_) => Ok(default),
    }
}
