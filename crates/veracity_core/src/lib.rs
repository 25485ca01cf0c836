//! Core data types for the veracity media relay.
//!
//! This crate holds the request-scoped data model (media references, frame
//! scores, verdicts) and the pure aggregation policy that turns remote scores
//! into a uniform verdict. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod frame;
mod media;
mod verdict;

pub use aggregate::{Aggregation, DETECTION_THRESHOLD, aggregate};
pub use frame::FrameScore;
pub use media::{MediaKind, MediaReference};
pub use verdict::{ImageScore, Verdict, VideoSource};
