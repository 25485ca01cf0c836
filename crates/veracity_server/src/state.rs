use crate::ServiceConfig;
use std::sync::Arc;
use veracity_error::{ConfigError, VeracityResult};
use veracity_pipeline::{AnalysisPipeline, AnalysisPipelineBuilder, HttpFetcher, MediaFetcher};
use veracity_resolver::PlatformResolver;
use veracity_scoring::SightengineClient;
use veracity_storage::{CloudinaryStage, StagingStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<AnalysisPipeline>,
    fetcher: Arc<dyn MediaFetcher>,
    max_body_bytes: usize,
}

impl AppState {
    /// Assemble state from already-built components.
    pub fn new(
        pipeline: Arc<AnalysisPipeline>,
        fetcher: Arc<dyn MediaFetcher>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            pipeline,
            fetcher,
            max_body_bytes,
        }
    }

    /// Build every production component from configuration.
    ///
    /// One HTTP client is shared by the extractors, the downloader, the proxy,
    /// the remote object stage and the scoring client.
    #[tracing::instrument(skip_all, fields(upload_dir = %config.server.upload_dir.display()))]
    pub fn from_config(config: &ServiceConfig) -> VeracityResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        let fetcher: Arc<dyn MediaFetcher> = Arc::new(HttpFetcher::new(client.clone()));
        let pipeline = AnalysisPipelineBuilder::default()
            .resolver(PlatformResolver::from_config(&config.extractors, client.clone()))
            .fetcher(fetcher.clone())
            .staging(Arc::new(StagingStore::new(&config.server.upload_dir)?))
            .object_stage(Arc::new(CloudinaryStage::new(
                config.object_stage.clone(),
                client.clone(),
            )))
            .scorer(Arc::new(SightengineClient::new(
                config.scoring.clone(),
                client,
            )))
            .config(config.pipeline)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to assemble pipeline: {}", e)))?;

        tracing::info!("Service components ready");
        Ok(Self::new(
            Arc::new(pipeline),
            fetcher,
            config.server.max_body_bytes,
        ))
    }

    /// The analysis pipeline.
    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.pipeline
    }

    /// Fetcher used by the proxy.
    pub fn fetcher(&self) -> &Arc<dyn MediaFetcher> {
        &self.fetcher
    }

    /// Request body bound.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}
