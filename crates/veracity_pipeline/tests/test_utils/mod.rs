//! Test doubles for the pipeline's collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use veracity_core::{FrameScore, ImageScore, MediaKind};
use veracity_error::{
    ScoringError, ScoringErrorKind, TransferError, TransferErrorKind, VeracityError, VeracityResult,
};
use veracity_pipeline::{AnalysisPipeline, AnalysisPipelineBuilder, FetchedMedia, MediaFetcher, PipelineConfig};
use veracity_resolver::{Extractor, PlatformResolver};
use veracity_scoring::MediaScorer;
use veracity_storage::{ObjectStage, RemoteObjectHandle, StagedFile, StagingStore};

/// Extractor returning a fixed payload.
pub struct StubExtractor<T> {
    payload: T,
    pub calls: AtomicUsize,
}

impl<T> StubExtractor<T> {
    pub fn new(payload: T) -> Arc<Self> {
        Arc::new(Self {
            payload,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> Extractor<T> for StubExtractor<T> {
    async fn extract(&self, _url: &str) -> VeracityResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

/// Extractor that never answers.
pub struct HangingExtractor;

impl HangingExtractor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> Extractor<T> for HangingExtractor {
    async fn extract(&self, _url: &str) -> VeracityResult<T> {
        std::future::pending().await
    }
}

/// How the mock fetcher answers.
#[derive(Debug, Clone)]
pub enum FetchBehavior {
    /// Serve these chunks
    Body(Vec<&'static [u8]>),
    /// Serve these chunks, then fail mid-stream
    BrokenBody(Vec<&'static [u8]>),
    /// Fail before any byte arrives
    Refuse,
}

/// Fetcher serving canned bodies and recording requested URLs.
pub struct MockFetcher {
    behavior: FetchBehavior,
    pub urls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new(behavior: FetchBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn serving(body: &'static [u8]) -> Arc<Self> {
        Self::new(FetchBehavior::Body(vec![body]))
    }

    pub fn call_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> VeracityResult<FetchedMedia> {
        self.urls.lock().unwrap().push(url.to_string());

        let chunks: Vec<VeracityResult<Bytes>> = match &self.behavior {
            FetchBehavior::Refuse => {
                return Err(TransferError::new(TransferErrorKind::Download(
                    "connection refused".to_string(),
                ))
                .into());
            }
            FetchBehavior::Body(chunks) => chunks
                .iter()
                .map(|chunk| Ok(Bytes::from_static(*chunk)))
                .collect(),
            FetchBehavior::BrokenBody(chunks) => chunks
                .iter()
                .map(|chunk| Ok(Bytes::from_static(*chunk)))
                .chain(std::iter::once(Err(VeracityError::from(TransferError::new(
                    TransferErrorKind::Download("connection reset".to_string()),
                )))))
                .collect(),
        };

        Ok(FetchedMedia::new(
            Some("video/mp4".to_string()),
            None,
            stream::iter(chunks).boxed(),
        ))
    }
}

/// Object stage recording uploads and deletes.
#[derive(Default)]
pub struct MockObjectStage {
    pub fail_upload: bool,
    pub uploads: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    pub deletes: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl MockObjectStage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_upload: true,
            ..Self::default()
        })
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStage for MockObjectStage {
    async fn upload(&self, file: &StagedFile, kind: MediaKind) -> VeracityResult<RemoteObjectHandle> {
        let contents = tokio::fs::read(file.path()).await.unwrap_or_default();
        self.uploads
            .lock()
            .unwrap()
            .push((file.path().to_path_buf(), contents));

        if self.fail_upload {
            return Err(TransferError::new(TransferErrorKind::Upload(
                "Invalid cloud_name".to_string(),
            ))
            .into());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(RemoteObjectHandle::new(
            format!("deepfake-detector/video_{}", id),
            format!("https://res.example/{}/video_{}.mp4", kind, id),
            kind,
        ))
    }

    async fn delete(&self, handle: &RemoteObjectHandle) -> VeracityResult<()> {
        self.deletes
            .lock()
            .unwrap()
            .push(handle.public_id().clone());
        Ok(())
    }
}

/// How the mock scorer answers.
#[derive(Debug, Clone)]
pub enum ScoreBehavior {
    Frames(Vec<f64>),
    Image(f64, Option<String>),
    Fail(String),
    /// Signal `started`, then never answer
    Hang,
}

/// Scorer returning canned scores.
///
/// When `watch_dir` is set, records how many files were in it at the moment
/// scoring began.
pub struct MockScorer {
    behavior: ScoreBehavior,
    pub watch_dir: Option<PathBuf>,
    pub staged_files_at_scoring: Mutex<Vec<usize>>,
    pub video_urls: Mutex<Vec<String>>,
    pub images: Mutex<Vec<(Vec<u8>, String)>>,
    pub started: Notify,
}

impl MockScorer {
    pub fn new(behavior: ScoreBehavior) -> Arc<Self> {
        Arc::new(Self::build(behavior, None))
    }

    pub fn watching(behavior: ScoreBehavior, dir: PathBuf) -> Arc<Self> {
        Arc::new(Self::build(behavior, Some(dir)))
    }

    fn build(behavior: ScoreBehavior, watch_dir: Option<PathBuf>) -> Self {
        Self {
            behavior,
            watch_dir,
            staged_files_at_scoring: Mutex::new(Vec::new()),
            video_urls: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
            started: Notify::new(),
        }
    }

    pub fn video_calls(&self) -> usize {
        self.video_urls.lock().unwrap().len()
    }

    async fn respond(&self) -> VeracityResult<ScoreBehavior> {
        self.started.notify_one();
        match &self.behavior {
            ScoreBehavior::Fail(message) => {
                Err(ScoringError::new(ScoringErrorKind::Api(message.clone())).into())
            }
            ScoreBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ScoringError::new(ScoringErrorKind::Api("unreachable".to_string())).into())
            }
            other => Ok(other.clone()),
        }
    }
}

#[async_trait]
impl MediaScorer for MockScorer {
    async fn score_image(&self, data: Vec<u8>, mime_type: &str) -> VeracityResult<ImageScore> {
        self.images.lock().unwrap().push((data, mime_type.to_string()));
        match self.respond().await? {
            ScoreBehavior::Image(score, class) => Ok(ImageScore::new(score, class)),
            _ => Ok(ImageScore::default()),
        }
    }

    async fn score_video_url(&self, stream_url: &str) -> VeracityResult<Vec<FrameScore>> {
        self.video_urls.lock().unwrap().push(stream_url.to_string());
        if let Some(dir) = &self.watch_dir {
            let count = std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0);
            self.staged_files_at_scoring.lock().unwrap().push(count);
        }
        match self.respond().await? {
            ScoreBehavior::Frames(frames) => Ok(frames.into_iter().map(FrameScore::new).collect()),
            _ => Ok(Vec::new()),
        }
    }
}

/// Number of entries left in a staging directory.
pub fn staged_file_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Assemble a pipeline over the given doubles.
pub fn pipeline(
    staging_dir: &std::path::Path,
    resolver: PlatformResolver,
    fetcher: Arc<MockFetcher>,
    stage: Arc<MockObjectStage>,
    scorer: Arc<MockScorer>,
    config: PipelineConfig,
) -> AnalysisPipeline {
    AnalysisPipelineBuilder::default()
        .resolver(resolver)
        .fetcher(fetcher)
        .staging(Arc::new(StagingStore::new(staging_dir).unwrap()))
        .object_stage(stage)
        .scorer(scorer)
        .config(config)
        .build()
        .unwrap()
}
