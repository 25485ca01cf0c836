//! Client for the remote synthetic-media detection API.
//!
//! Two submission modes:
//!
//! - **Single-asset**: raw image bytes in, one [`ImageScore`] out.
//! - **Streaming-URL**: a fetchable video URL in, one [`FrameScore`] per
//!   sampled frame out. The call blocks until the service has scored every
//!   sampled frame.
//!
//! The [`MediaScorer`] trait is the seam the pipeline depends on;
//! [`SightengineClient`] is the production implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod dto;

pub use client::{MediaScorer, SightengineClient};
pub use config::ScoringConfig;
pub use dto::{ApiErrorBody, DetectionResponse, FrameEntry, TypeScores, VideoData};
pub use veracity_core::{FrameScore, ImageScore};
pub use veracity_error::{ScoringError, ScoringErrorKind};
