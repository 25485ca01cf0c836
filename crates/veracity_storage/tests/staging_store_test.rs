//! Tests for local staging.

use bytes::Bytes;
use futures::stream;
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;
use veracity_error::{
    TransferError, TransferErrorKind, VeracityError, VeracityErrorKind, VeracityResult,
};
use veracity_storage::StagingStore;

fn chunks(parts: &[&'static [u8]]) -> impl futures::Stream<Item = VeracityResult<Bytes>> + Send {
    stream::iter(
        parts
            .iter()
            .map(|part| Ok(Bytes::from_static(part)))
            .collect::<Vec<_>>(),
    )
}

#[tokio::test]
async fn test_store_writes_all_chunks() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = StagingStore::new(temp_dir.path())?;

    let staged = store.store(chunks(&[b"Hello, ", b"world!"]), "mp4").await?;

    assert_eq!(staged.size(), 13);
    assert!(staged.path().starts_with(temp_dir.path()));
    assert_eq!(staged.path().extension().and_then(|e| e.to_str()), Some("mp4"));
    assert_eq!(tokio::fs::read(staged.path()).await?, b"Hello, world!");
    Ok(())
}

#[tokio::test]
async fn test_creates_missing_directory() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let nested = temp_dir.path().join("a").join("b");
    let store = StagingStore::new(&nested)?;
    assert!(nested.is_dir());
    assert_eq!(store.base_path(), nested.as_path());
    Ok(())
}

#[tokio::test]
async fn test_release_removes_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = StagingStore::new(temp_dir.path())?;

    let mut staged = store.store(chunks(&[b"data"]), "mp4").await?;
    let path = staged.path().to_path_buf();
    assert!(path.exists());

    staged.release().await;
    assert!(!path.exists());
    assert!(staged.is_released());
    Ok(())
}

#[tokio::test]
async fn test_release_is_idempotent() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = StagingStore::new(temp_dir.path())?;

    let mut staged = store.store(chunks(&[b"data"]), "mp4").await?;
    staged.release().await;
    staged.release().await;
    drop(staged);
    Ok(())
}

#[tokio::test]
async fn test_release_of_vanished_file_does_not_fail() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = StagingStore::new(temp_dir.path())?;

    let mut staged = store.store(chunks(&[b"data"]), "mp4").await?;
    std::fs::remove_file(staged.path())?;
    staged.release().await;
    Ok(())
}

#[tokio::test]
async fn test_drop_removes_unreleased_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = StagingStore::new(temp_dir.path())?;

    let staged = store.store(chunks(&[b"data"]), "mp4").await?;
    let path = staged.path().to_path_buf();
    drop(staged);

    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn test_failed_stream_leaves_nothing_behind() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = StagingStore::new(temp_dir.path())?;

    let failing = stream::iter(vec![
        Ok::<_, VeracityError>(Bytes::from_static(b"partial")),
        Err(VeracityError::from(TransferError::new(
            TransferErrorKind::Download("connection reset".to_string()),
        ))),
    ]);

    let err = store.store(failing, "mp4").await.unwrap_err();
    assert!(matches!(err.kind(), VeracityErrorKind::Transfer(_)));
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_stores_never_collide() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = Arc::new(StagingStore::new(temp_dir.path())?);

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.store(chunks(&[b"x"]), "mp4").await })
        })
        .collect();

    let mut staged = Vec::new();
    for task in tasks {
        staged.push(task.await??);
    }

    let paths: HashSet<_> = staged.iter().map(|s| s.path().to_path_buf()).collect();
    assert_eq!(paths.len(), 32);

    drop(staged);
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}
