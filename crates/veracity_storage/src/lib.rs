//! Staging of media bytes on their way to the detection service.
//!
//! Two stages, each with a guard that guarantees cleanup:
//!
//! - **Local staging**: [`StagingStore`] streams bytes into a uniquely named
//!   file and hands back a [`StagedFile`]. The file is removed on
//!   [`StagedFile::release`] or, failing that, when the guard drops.
//! - **Remote staging**: an [`ObjectStage`] uploads a staged file to a cloud
//!   intermediary so the detection service can fetch it by URL. The returned
//!   [`RemoteObject`] deletes the remote copy on release or drop.
//!
//! # Example
//!
//! ```rust
//! use veracity_storage::StagingStore;
//! use bytes::Bytes;
//! use futures::stream;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StagingStore::new(std::env::temp_dir().join("veracity-doc"))?;
//! let chunks = stream::iter(vec![Ok(Bytes::from_static(b"frame data"))]);
//! let mut staged = store.store(chunks, "mp4").await?;
//! assert_eq!(staged.size(), 10);
//!
//! staged.release().await;
//! assert!(!staged.path().exists());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cloudinary;
mod config;
mod object_stage;
mod staging;

pub use cloudinary::CloudinaryStage;
pub use config::{ObjectStageConfig, SignatureAlgorithm};
pub use object_stage::{ObjectStage, RemoteObject, RemoteObjectHandle};
pub use staging::{StagedFile, StagingStore};
pub use veracity_error::{StorageError, StorageErrorKind};
