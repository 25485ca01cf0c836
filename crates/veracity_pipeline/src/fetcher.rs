//! Streaming HTTP downloads.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use tracing::instrument;
use veracity_error::{TransferError, TransferErrorKind, VeracityError, VeracityResult};

/// Product token sent with every outbound fetch.
pub const USER_AGENT: &str = concat!("veracity/", env!("CARGO_PKG_VERSION"));

/// A successful upstream response whose body has not been read yet.
pub struct FetchedMedia {
    content_type: Option<String>,
    content_length: Option<u64>,
    body: BoxStream<'static, VeracityResult<Bytes>>,
}

impl FetchedMedia {
    /// Wrap response metadata and a body stream.
    pub fn new(
        content_type: Option<String>,
        content_length: Option<u64>,
        body: BoxStream<'static, VeracityResult<Bytes>>,
    ) -> Self {
        Self {
            content_type,
            content_length,
            body,
        }
    }

    /// Upstream `Content-Type`, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Upstream `Content-Length`, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Consume into the body stream.
    pub fn into_body(self) -> BoxStream<'static, VeracityResult<Bytes>> {
        self.body
    }
}

impl std::fmt::Debug for FetchedMedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedMedia")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Opens a byte stream for a URL.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Request `url`. Non-success statuses are
    /// [`TransferErrorKind::Status`] errors.
    async fn fetch(&self, url: &str) -> VeracityResult<FetchedMedia>;
}

/// [`MediaFetcher`] over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> VeracityResult<FetchedMedia> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| TransferError::new(TransferErrorKind::Download(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upstream refused fetch");
            return Err(TransferError::new(TransferErrorKind::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            })
            .into());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();
        tracing::debug!(?content_type, ?content_length, "Upstream accepted fetch");

        let body = response
            .bytes_stream()
            .map(|chunk| {
                chunk.map_err(|e| {
                    VeracityError::from(TransferError::new(TransferErrorKind::Download(
                        e.to_string(),
                    )))
                })
            })
            .boxed();

        Ok(FetchedMedia::new(content_type, content_length, body))
    }
}
