//! Byte transfer errors (download and remote staging).

/// Kinds of transfer failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransferErrorKind {
    /// Fetching the media URL failed (network, stream, or timeout)
    #[display("{}", _0)]
    Download(String),
    /// The upstream answered with a non-success status
    #[display("{} {}", status, reason)]
    Status {
        /// HTTP status code returned upstream
        status: u16,
        /// Canonical reason phrase or body excerpt
        reason: String,
    },
    /// Uploading to the remote object stage failed
    #[display("{}", _0)]
    Upload(String),
    /// Deleting a remote object failed
    #[display("{}", _0)]
    Delete(String),
}

/// Transfer error with location tracking.
///
/// # Examples
///
/// ```
/// use veracity_error::{TransferError, TransferErrorKind};
///
/// let err = TransferError::new(TransferErrorKind::Upload("quota exceeded".to_string()));
/// assert_eq!(err.kind.to_string(), "quota exceeded");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transfer Error: {} at line {} in {}", kind, line, file)]
pub struct TransferError {
    /// The kind of error that occurred
    pub kind: TransferErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransferError {
    /// Create a new transfer error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransferErrorKind) -> Self {
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
