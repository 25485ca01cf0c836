use std::future::Future;
use std::time::Duration;
use veracity_error::{
    ResolutionError, ScoringError, ScoringErrorKind, TransferError, TransferErrorKind,
    VeracityError, VeracityResult,
};

/// Time-bounded pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PipelineStage {
    /// Platform URL to direct URL
    Resolving,
    /// Direct URL into local staging
    Downloading,
    /// Local staging to the remote object stage
    Uploading,
    /// Remote detection call
    Scoring,
}

impl PipelineStage {
    /// The error reported when this stage exceeds `limit`.
    ///
    /// Each stage times out as its own error class, so the HTTP mapping is
    /// the same as for any other failure of that stage.
    pub fn timeout_error(self, limit: Duration) -> VeracityError {
        match self {
            Self::Resolving => ResolutionError::new(format!(
                "Timed out resolving video URL after {:?}",
                limit
            ))
            .into(),
            Self::Downloading => TransferError::new(TransferErrorKind::Download(format!(
                "Download timed out after {:?}",
                limit
            )))
            .into(),
            Self::Uploading => TransferError::new(TransferErrorKind::Upload(format!(
                "Upload timed out after {:?}",
                limit
            )))
            .into(),
            Self::Scoring => ScoringError::new(ScoringErrorKind::Timeout(limit)).into(),
        }
    }
}

/// Run `future` as `stage`, failing with the stage's timeout error after `limit`.
pub(crate) async fn bounded<T, F>(stage: PipelineStage, limit: Duration, future: F) -> VeracityResult<T>
where
    F: Future<Output = VeracityResult<T>>,
{
    tracing::debug!(%stage, "Entering stage");
    match tokio::time::timeout(limit, future).await {
        Ok(result) => {
            if let Err(e) = &result {
                tracing::warn!(%stage, error = %e, "Stage failed");
            }
            result
        }
        Err(_) => {
            tracing::warn!(%stage, timeout_ms = limit.as_millis() as u64, "Stage timed out");
            Err(stage.timeout_error(limit))
        }
    }
}
