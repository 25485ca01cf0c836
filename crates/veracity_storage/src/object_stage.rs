//! Remote object staging and its cleanup guard.

use crate::StagedFile;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use veracity_core::MediaKind;
use veracity_error::VeracityResult;

/// Cloud intermediary that makes local bytes fetchable by URL.
#[async_trait]
pub trait ObjectStage: Send + Sync {
    /// Upload a staged file, returning its remote handle.
    async fn upload(&self, file: &StagedFile, kind: MediaKind) -> VeracityResult<RemoteObjectHandle>;

    /// Delete a previously uploaded object.
    async fn delete(&self, handle: &RemoteObjectHandle) -> VeracityResult<()>;
}

/// Identifier and public URL of an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct RemoteObjectHandle {
    /// Provider-side identifier, namespaced under the configured folder
    public_id: String,
    /// Publicly fetchable URL
    secure_url: String,
    /// Resource type the object was created as
    kind: MediaKind,
}

impl RemoteObjectHandle {
    /// Create a handle.
    pub fn new(public_id: impl Into<String>, secure_url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            public_id: public_id.into(),
            secure_url: secure_url.into(),
            kind,
        }
    }
}

/// Owned remote object, deleted exactly once.
///
/// [`RemoteObject::release`] deletes with retry and a time bound. If the guard
/// is dropped unreleased, a best-effort delete is spawned on the current Tokio
/// runtime.
pub struct RemoteObject {
    handle: RemoteObjectHandle,
    stage: Arc<dyn ObjectStage>,
    cleanup_timeout: Duration,
    released: bool,
}

impl RemoteObject {
    const RETRY_BASE_MS: u64 = 200;
    const RETRY_ATTEMPTS: usize = 3;

    /// Wrap a freshly uploaded object.
    pub fn new(handle: RemoteObjectHandle, stage: Arc<dyn ObjectStage>, cleanup_timeout: Duration) -> Self {
        Self {
            handle,
            stage,
            cleanup_timeout,
            released: false,
        }
    }

    /// The wrapped handle.
    pub fn handle(&self) -> &RemoteObjectHandle {
        &self.handle
    }

    /// Public fetch URL.
    pub fn url(&self) -> &str {
        self.handle.secure_url()
    }

    /// Delete the remote object. Failures are logged, never returned.
    #[tracing::instrument(skip(self), fields(public_id = %self.handle.public_id()))]
    ///
    /// The guard stays armed until the delete finishes, so cancelling this
    /// future still schedules the delete from `Drop`.
    pub async fn release(mut self) {
        delete_with_retry(self.stage.clone(), self.handle.clone(), self.cleanup_timeout).await;
        self.released = true;
    }
}

impl Drop for RemoteObject {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                tracing::debug!(
                    public_id = %self.handle.public_id(),
                    "Remote object dropped unreleased, scheduling delete"
                );
                runtime.spawn(delete_with_retry(
                    self.stage.clone(),
                    self.handle.clone(),
                    self.cleanup_timeout,
                ));
            }
            Err(_) => tracing::warn!(
                public_id = %self.handle.public_id(),
                "Remote object dropped outside a runtime, leaving it in place"
            ),
        }
    }
}

async fn delete_with_retry(stage: Arc<dyn ObjectStage>, handle: RemoteObjectHandle, timeout: Duration) {
    let retry_strategy = ExponentialBackoff::from_millis(RemoteObject::RETRY_BASE_MS)
        .factor(2)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(RemoteObject::RETRY_ATTEMPTS);

    let attempt = Retry::spawn(retry_strategy, || {
        let stage = stage.clone();
        let handle = handle.clone();
        async move {
            stage.delete(&handle).await.map_err(|e| {
                tracing::debug!(error = %e, "Remote delete failed, will retry");
                RetryError::Transient {
                    err: e,
                    retry_after: None,
                }
            })
        }
    });

    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(())) => tracing::info!(public_id = %handle.public_id(), "Deleted remote object"),
        Ok(Err(e)) => tracing::warn!(
            public_id = %handle.public_id(),
            error = %e,
            "Failed to delete remote object"
        ),
        Err(_) => tracing::warn!(
            public_id = %handle.public_id(),
            timeout_ms = timeout.as_millis() as u64,
            "Timed out deleting remote object"
        ),
    }
}
