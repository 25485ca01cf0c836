//! Top-level error wrapper types.

use crate::{
    ConfigError, ResolutionError, ScoringError, StorageError, TransferError, ValidationError,
};

/// Every failure a veracity request can end in.
///
/// # Examples
///
/// ```
/// use veracity_error::{VeracityError, ValidationError};
///
/// let err: VeracityError = ValidationError::new("Missing video URL").into();
/// assert!(format!("{}", err).contains("Validation Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VeracityErrorKind {
    /// Missing or malformed client input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Platform URL could not be resolved
    #[from(ResolutionError)]
    Resolution(ResolutionError),
    /// Download or remote-stage transfer failed
    #[from(TransferError)]
    Transfer(TransferError),
    /// Local staging storage failed
    #[from(StorageError)]
    Storage(StorageError),
    /// Remote detection service failed
    #[from(ScoringError)]
    Scoring(ScoringError),
    /// Missing or invalid configuration
    #[from(ConfigError)]
    Config(ConfigError),
}

impl VeracityErrorKind {
    /// The bare client-facing message of the wrapped error.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.message().to_string(),
            Self::Resolution(e) => e.message().to_string(),
            Self::Transfer(e) => e.message(),
            Self::Storage(e) => e.message(),
            Self::Scoring(e) => e.message(),
            Self::Config(e) => e.message().to_string(),
        }
    }
}

/// Veracity error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Veracity Error: {}", _0)]
pub struct VeracityError(Box<VeracityErrorKind>);

impl VeracityError {
    /// Create a new error from a kind.
    pub fn new(kind: VeracityErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VeracityErrorKind {
        &self.0
    }

    /// The bare client-facing message of the wrapped error.
    pub fn message(&self) -> String {
        self.0.message()
    }
}

// Generic From implementation for any type that converts to VeracityErrorKind
impl<T> From<T> for VeracityError
where
    T: Into<VeracityErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for veracity operations.
pub type VeracityResult<T> = std::result::Result<T, VeracityError>;
