//! Test doubles and request helpers for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, body::Body, http::Request};
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use veracity_core::{FrameScore, ImageScore, MediaKind};
use veracity_error::{
    ResolutionError, ScoringError, ScoringErrorKind, TransferError, TransferErrorKind,
    VeracityResult,
};
use veracity_pipeline::{AnalysisPipelineBuilder, FetchedMedia, MediaFetcher, PipelineConfig};
use veracity_resolver::{PlatformResolver, ResolveStrategy};
use veracity_scoring::MediaScorer;
use veracity_server::{AppState, router};
use veracity_storage::{ObjectStage, RemoteObjectHandle, StagedFile, StagingStore};

/// How the fetcher answers.
#[derive(Debug, Clone)]
pub enum Upstream {
    Body(&'static str, &'static [u8]),
    Status(u16, &'static str),
    Unreachable,
}

pub struct MockFetcher {
    upstream: Upstream,
    pub calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new(upstream: Upstream) -> Arc<Self> {
        Arc::new(Self {
            upstream,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> VeracityResult<FetchedMedia> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.upstream {
            Upstream::Body(content_type, body) => Ok(FetchedMedia::new(
                Some(content_type.to_string()),
                Some(body.len() as u64),
                stream::iter(vec![Ok(Bytes::from_static(*body))]).boxed(),
            )),
            Upstream::Status(status, reason) => Err(TransferError::new(TransferErrorKind::Status {
                status: *status,
                reason: reason.to_string(),
            })
            .into()),
            Upstream::Unreachable => Err(TransferError::new(TransferErrorKind::Download(
                "dns error".to_string(),
            ))
            .into()),
        }
    }
}

#[derive(Default)]
pub struct MockObjectStage {
    pub fail_upload: bool,
    pub uploads: AtomicUsize,
    pub deletes: AtomicUsize,
}

#[async_trait]
impl ObjectStage for MockObjectStage {
    async fn upload(&self, _file: &StagedFile, kind: MediaKind) -> VeracityResult<RemoteObjectHandle> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_upload {
            return Err(TransferError::new(TransferErrorKind::Upload("quota exceeded".to_string())).into());
        }
        Ok(RemoteObjectHandle::new(
            "deepfake-detector/video_1",
            "https://res.example/video_1.mp4",
            kind,
        ))
    }

    async fn delete(&self, _handle: &RemoteObjectHandle) -> VeracityResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub enum Scores {
    Frames(Vec<f64>),
    Image(f64, Option<&'static str>),
    Fail(&'static str),
}

pub struct MockScorer {
    scores: Scores,
    pub uploaded: Mutex<Vec<u8>>,
}

impl MockScorer {
    pub fn new(scores: Scores) -> Arc<Self> {
        Arc::new(Self {
            scores,
            uploaded: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl MediaScorer for MockScorer {
    async fn score_image(&self, data: Vec<u8>, _mime_type: &str) -> VeracityResult<ImageScore> {
        *self.uploaded.lock().unwrap() = data;
        match &self.scores {
            Scores::Image(score, class) => Ok(ImageScore::new(*score, class.map(str::to_string))),
            Scores::Fail(message) => {
                Err(ScoringError::new(ScoringErrorKind::Api(message.to_string())).into())
            }
            Scores::Frames(_) => Ok(ImageScore::default()),
        }
    }

    async fn score_video_url(&self, _stream_url: &str) -> VeracityResult<Vec<FrameScore>> {
        match &self.scores {
            Scores::Frames(frames) => Ok(frames.iter().copied().map(FrameScore::new).collect()),
            Scores::Fail(message) => {
                Err(ScoringError::new(ScoringErrorKind::Api(message.to_string())).into())
            }
            Scores::Image(..) => Ok(Vec::new()),
        }
    }
}

/// Strategy that always fails with the platform fallback.
pub struct FailingStrategy(pub &'static str);

#[async_trait]
impl ResolveStrategy for FailingStrategy {
    async fn resolve(&self, _url: &str) -> Result<String, ResolutionError> {
        Err(ResolutionError::platform(self.0))
    }
}

pub struct Harness {
    pub app: Router,
    pub fetcher: Arc<MockFetcher>,
    pub stage: Arc<MockObjectStage>,
    pub scorer: Arc<MockScorer>,
    pub staging_dir: tempfile::TempDir,
}

impl Harness {
    pub fn new(upstream: Upstream, stage: MockObjectStage, scores: Scores) -> Self {
        Self::with_limit(upstream, stage, scores, 1024 * 1024)
    }

    pub fn with_limit(
        upstream: Upstream,
        stage: MockObjectStage,
        scores: Scores,
        max_body_bytes: usize,
    ) -> Self {
        let staging_dir = tempfile::TempDir::new().unwrap();
        let fetcher = MockFetcher::new(upstream);
        let stage = Arc::new(stage);
        let scorer = MockScorer::new(scores);

        let resolver = PlatformResolver::builder()
            .instagram(FailingStrategy("Instagram"))
            .build();
        let pipeline = AnalysisPipelineBuilder::default()
            .resolver(resolver)
            .fetcher(fetcher.clone())
            .staging(Arc::new(StagingStore::new(staging_dir.path()).unwrap()))
            .object_stage(stage.clone())
            .scorer(scorer.clone())
            .config(PipelineConfig::default())
            .build()
            .unwrap();

        let state = AppState::new(Arc::new(pipeline), fetcher.clone(), max_body_bytes);
        Self {
            app: router(state),
            fetcher,
            stage,
            scorer,
            staging_dir,
        }
    }

    pub fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const BOUNDARY: &str = "veracity-test-boundary";

/// Multipart body with one file field.
pub fn multipart_request(field: &str, file_name: &str, contents: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: video/mp4\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze-video")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
