//! Remote object stage configuration.

use veracity_error::ConfigError;

/// Digest used to sign remote stage requests.
///
/// Accounts sign with SHA-1 unless configured otherwise.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SignatureAlgorithm {
    /// SHA-1
    #[default]
    Sha1,
    /// SHA-256
    Sha256,
}

/// Credentials and placement of remote staged objects.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectStageConfig {
    /// Cloud (account) name
    pub cloud_name: String,
    /// API key
    pub api_key: String,
    /// API secret, used only for request signing
    pub api_secret: String,
    /// Folder every object is created under
    pub folder: String,
    /// API base URL (e.g., "https://api.cloudinary.com/v1_1")
    pub base_url: String,
    /// Request signature digest
    pub signature_algorithm: SignatureAlgorithm,
}

impl std::fmt::Debug for ObjectStageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStageConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("folder", &self.folder)
            .field("base_url", &self.base_url)
            .field("signature_algorithm", &self.signature_algorithm)
            .finish()
    }
}

impl ObjectStageConfig {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.cloudinary.com/v1_1";
    /// Default object folder.
    pub const DEFAULT_FOLDER: &'static str = "deepfake-detector";

    /// Create a configuration with the default folder and base URL.
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: Self::DEFAULT_FOLDER.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }

    /// Set the request signature digest.
    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `CLOUDINARY_CLOUD_NAME` (required)
    /// - `CLOUDINARY_API_KEY` (required)
    /// - `CLOUDINARY_API_SECRET` (required)
    /// - `CLOUDINARY_FOLDER` (default: "deepfake-detector")
    /// - `CLOUDINARY_BASE_URL` (default: "https://api.cloudinary.com/v1_1")
    /// - `CLOUDINARY_SIGNATURE_ALGORITHM` (`sha1` or `sha256`, default: `sha1`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let required = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    ConfigError::new(format!(
                        "Cloudinary not configured: {} not set",
                        name
                    ))
                })
        };

        let mut config = Self::new(
            required("CLOUDINARY_CLOUD_NAME")?,
            required("CLOUDINARY_API_KEY")?,
            required("CLOUDINARY_API_SECRET")?,
        );
        if let Ok(folder) = std::env::var("CLOUDINARY_FOLDER") {
            config.folder = folder;
        }
        if let Ok(base_url) = std::env::var("CLOUDINARY_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(algorithm) = std::env::var("CLOUDINARY_SIGNATURE_ALGORITHM") {
            config.signature_algorithm = algorithm.parse().map_err(|_| {
                ConfigError::new(format!(
                    "Invalid CLOUDINARY_SIGNATURE_ALGORITHM: {} (expected sha1 or sha256)",
                    algorithm
                ))
            })?;
        }
        Ok(config)
    }
}
