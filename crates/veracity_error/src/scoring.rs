//! Errors reported by the remote detection service client.

/// Error kinds for scoring operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ScoringErrorKind {
    /// The request never produced a response
    #[display("{}", _0)]
    Http(String),

    /// The service reported `status: failure`
    #[display("{}", _0)]
    Api(String),

    /// The response body could not be decoded
    #[display("Failed to deserialize response: {}", _0)]
    Deserialization(String),

    /// The video response carried no frame data
    #[display("Video analysis returned no frame data.")]
    MissingFrames,

    /// The call did not complete within the configured bound
    #[display("Scoring timed out after {:?}", _0)]
    Timeout(std::time::Duration),
}

/// Scoring error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scoring Error: {} at line {} in {}", kind, line, file)]
pub struct ScoringError {
    /// The error kind
    pub kind: ScoringErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ScoringError {
    /// Create a new ScoringError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScoringErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The bare message without location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
