//! Platform URL resolution errors.

/// A social-media URL could not be turned into a downloadable media URL.
///
/// The message is client-facing and stable across resolver backends: platform
/// strategies build it with [`ResolutionError::platform`] and never forward the
/// underlying extractor's error text.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Resolution Error: {} at line {} in {}", message, line, file)]
pub struct ResolutionError {
    /// Client-facing message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ResolutionError {
    /// Create a new ResolutionError with an arbitrary message.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The fallback error for a platform whose extractor failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_error::ResolutionError;
    ///
    /// let err = ResolutionError::platform("Instagram");
    /// assert_eq!(
    ///     err.message(),
    ///     "Could not extract video from Instagram URL. Please use file upload instead."
    /// );
    /// ```
    #[track_caller]
    pub fn platform(platform: &str) -> Self {
        Self::new(format!(
            "Could not extract video from {} URL. Please use file upload instead.",
            platform
        ))
    }

    /// The bare message without location.
    pub fn message(&self) -> &str {
        &self.message
    }
}
