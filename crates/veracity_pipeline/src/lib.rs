//! Staged media analysis for veracity.
//!
//! [`AnalysisPipeline`] sequences the external collaborators for each flow:
//!
//! | Flow | Stages |
//! |------|--------|
//! | Video URL | resolve, download, stage locally, upload, score, aggregate |
//! | Uploaded video | stage locally, upload, score, aggregate |
//! | Image | decode, score |
//!
//! Every stage is bounded by a timeout from [`PipelineConfig`]. Staged files
//! and remote objects are held in guards, so they are removed on every exit
//! path, including a dropped (cancelled) request future.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod fetcher;
mod image;
mod pipeline;
mod stage;

pub use config::PipelineConfig;
pub use fetcher::{FetchedMedia, HttpFetcher, MediaFetcher, USER_AGENT};
pub use image::decode_image;
pub use pipeline::{AnalysisPipeline, AnalysisPipelineBuilder, AnalysisPipelineBuilderError};
pub use stage::PipelineStage;
