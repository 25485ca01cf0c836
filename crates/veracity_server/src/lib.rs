//! HTTP surface of the veracity relay.
//!
//! # Routes
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET` | `/` | health and route listing |
//! | `POST` | `/analyze` | JSON `{ base64, mimeType }` |
//! | `POST` | `/analyze-video` | multipart, file field `video` |
//! | `POST` | `/analyze-video-url` | JSON `{ videoUrl }` |
//! | `GET` | `/proxy?url=` | streamed passthrough |
//!
//! Analysis routes answer with the verdict JSON
//! (`is_likely_ai_generated`, `confidence_score`, `reasoning`,
//! `potential_artifacts`) or an error body `{ error, details?, suggestion? }`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod observability;
mod routes;
mod state;

pub use config::{ServerConfig, ServiceConfig};
pub use error::{ApiError, ErrorBody};
pub use observability::{ObservabilityConfig, init_observability, shutdown_observability};
pub use routes::{AnalyzeImageRequest, AnalyzeUrlRequest, ProxyParams, router, upload_extension};
pub use state::AppState;
