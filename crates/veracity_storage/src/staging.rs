//! Local filesystem staging.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use veracity_error::{StorageError, StorageErrorKind, VeracityResult};

/// Directory holding request-scoped staged files.
///
/// File names combine a millisecond timestamp, a per-store sequence number and
/// a random UUID, so concurrent requests never share a path.
#[derive(Debug)]
pub struct StagingStore {
    base_path: PathBuf,
    sequence: AtomicU64,
}

impl StagingStore {
    /// Create a staging store rooted at `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> VeracityResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created staging store");
        Ok(Self {
            base_path,
            sequence: AtomicU64::new(0),
        })
    }

    /// Root directory of staged files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn unique_path(&self, extension: &str) -> PathBuf {
        let millis = chrono::Utc::now().timestamp_millis();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let token = uuid::Uuid::new_v4().simple();
        self.base_path.join(format!(
            "temp_video_{}_{}_{}.{}",
            millis, sequence, token, extension
        ))
    }

    /// Stream `chunks` into a new staged file.
    ///
    /// The first failing chunk aborts the write; whatever was written so far
    /// is removed before the error is returned.
    #[tracing::instrument(skip(self, chunks))]
    pub async fn store<S>(&self, chunks: S, extension: &str) -> VeracityResult<StagedFile>
    where
        S: Stream<Item = VeracityResult<Bytes>> + Send,
    {
        let path = self.unique_path(extension);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;

        // From here on the guard owns the path.
        let mut staged = StagedFile::new(path);
        let mut chunks = std::pin::pin!(chunks);

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    staged.path.display(),
                    e
                )))
            })?;
            staged.size += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "flush {}: {}",
                staged.path.display(),
                e
            )))
        })?;

        tracing::info!(
            path = %staged.path.display(),
            size = staged.size,
            "Staged media file"
        );

        Ok(staged)
    }
}

/// A staged file owned by exactly one request.
///
/// Removed by [`StagedFile::release`]; if the guard is dropped unreleased
/// (early return, error, cancelled request) the file is removed in `Drop`.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    size: u64,
    released: bool,
}

impl StagedFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            size: 0,
            released: false,
        }
    }

    /// Location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the file has already been released.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Remove the file. Idempotent; failures are logged, never returned.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!("Removed staged file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Staged file already gone")
            }
            Err(e) => tracing::warn!(error = %e, "Failed to remove staged file"),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed staged file on drop"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staged file on drop"
            ),
        }
    }
}
