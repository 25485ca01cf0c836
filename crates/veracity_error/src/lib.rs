//! Error types for the veracity media relay.
//!
//! This crate provides the error taxonomy shared by every veracity crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind (or a message) with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The HTTP boundary never shows the location; it reads the bare message via
//! `message()` or the kind's `Display`.
//!
//! # Examples
//!
//! ```
//! use veracity_error::{VeracityResult, ValidationError};
//!
//! fn require_url(url: Option<&str>) -> VeracityResult<&str> {
//!     Ok(url.ok_or_else(|| ValidationError::new("Missing video URL"))?)
//! }
//!
//! assert!(require_url(None).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod resolution;
mod scoring;
mod storage;
mod transfer;
mod validation;

pub use config::ConfigError;
pub use error::{VeracityError, VeracityErrorKind, VeracityResult};
pub use resolution::ResolutionError;
pub use scoring::{ScoringError, ScoringErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use transfer::{TransferError, TransferErrorKind};
pub use validation::ValidationError;
