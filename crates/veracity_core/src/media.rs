//! Client-supplied media references.

use serde::{Deserialize, Serialize};

/// Kind of media being relayed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image, scored in single-asset mode
    #[display("image")]
    Image,
    /// Video, scored from a fetchable URL
    #[display("video")]
    Video,
}

impl MediaKind {
    /// String form used as the remote stage resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Media as received from the client. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaReference {
    /// A URL to resolve and download
    Url(String),
    /// Raw bytes plus their declared content type
    Bytes {
        /// The decoded media bytes
        data: Vec<u8>,
        /// Declared MIME type, e.g. `image/jpeg`
        mime_type: String,
    },
}
