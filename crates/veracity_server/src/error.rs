//! Error to HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use veracity_core::MediaKind;
use veracity_error::{TransferErrorKind, VeracityError, VeracityErrorKind};

const UPLOAD_SUGGESTION: &str = "Use the \"Upload Video\" option in the app instead";

/// JSON error body: `{ error, details?, suggestion? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable, client-facing summary
    pub error: String,
    /// Underlying cause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// What the client can do instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            suggestion: None,
        }
    }

    fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// A failed analysis, rendered per the media kind being analyzed.
#[derive(Debug)]
pub struct ApiError {
    error: VeracityError,
    kind: MediaKind,
}

impl ApiError {
    /// Failure of an image analysis.
    pub fn image(error: impl Into<VeracityError>) -> Self {
        Self {
            error: error.into(),
            kind: MediaKind::Image,
        }
    }

    /// Failure of a video analysis.
    pub fn video(error: impl Into<VeracityError>) -> Self {
        Self {
            error: error.into(),
            kind: MediaKind::Video,
        }
    }

    /// The wrapped error.
    pub fn error(&self) -> &VeracityError {
        &self.error
    }

    /// Status code and body for this error.
    pub fn to_parts(&self) -> (StatusCode, ErrorBody) {
        let message = self.error.message();
        match self.error.kind() {
            VeracityErrorKind::Validation(_) => (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
            VeracityErrorKind::Resolution(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    suggestion: Some(UPLOAD_SUGGESTION.to_string()),
                    ..ErrorBody::new(message)
                },
            ),
            VeracityErrorKind::Transfer(e) => {
                let summary = match e.kind {
                    TransferErrorKind::Download(_) | TransferErrorKind::Status { .. } => {
                        "Failed to download video from URL"
                    }
                    TransferErrorKind::Upload(_) | TransferErrorKind::Delete(_) => {
                        "Failed to upload video to cloud storage"
                    }
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(summary).with_details(message),
                )
            }
            VeracityErrorKind::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Failed to stage media").with_details(message),
            ),
            VeracityErrorKind::Scoring(_) => {
                let summary = match self.kind {
                    MediaKind::Image => "Failed to analyze media",
                    MediaKind::Video => "Failed to analyze video",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(summary).with_details(message),
                )
            }
            VeracityErrorKind::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(message))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        if status.is_server_error() {
            tracing::error!(kind = %self.kind, error = %self.error, "Analysis failed");
        } else {
            tracing::warn!(kind = %self.kind, error = %self.error, "Analysis rejected");
        }
        (status, Json(body)).into_response()
    }
}
