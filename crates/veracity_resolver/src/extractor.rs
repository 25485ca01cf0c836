//! Opaque platform extractors.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::instrument;
use veracity_error::{ResolutionError, VeracityResult};

/// Turns a platform page URL into that platform's extraction payload.
///
/// How the payload is obtained (scraping, a third-party API, a sidecar
/// service) is the implementor's business.
#[async_trait]
pub trait Extractor<T>: Send + Sync {
    /// Extract the payload for `url`.
    async fn extract(&self, url: &str) -> VeracityResult<T>;
}

/// Extractor backed by an HTTP sidecar.
///
/// Issues `GET {endpoint}?url=<page url>` and decodes the JSON body as `T`.
pub struct HttpExtractor<T> {
    client: reqwest::Client,
    endpoint: String,
    _payload: PhantomData<fn() -> T>,
}

impl<T> HttpExtractor<T> {
    /// Create an extractor for the given endpoint.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            _payload: PhantomData,
        }
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl<T> Extractor<T> for HttpExtractor<T>
where
    T: DeserializeOwned + Send + 'static,
{
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn extract(&self, url: &str) -> VeracityResult<T> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| ResolutionError::new(format!("Extractor request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ResolutionError::new(format!("Extractor returned: {}", status)).into());
        }

        let payload = response
            .json()
            .await
            .map_err(|e| ResolutionError::new(format!("Failed to parse extractor payload: {}", e)))?;

        Ok(payload)
    }
}
