//! Response shapes of the platform extractors.

use serde::{Deserialize, Serialize};

/// Instagram extractor response.
///
/// `{ "status": true, "data": [{ "url": "...", "thumbnail": "..." }] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct InstagramPayload {
    /// Whether extraction succeeded
    #[serde(default)]
    status: bool,
    /// Extracted media, first entry preferred
    #[serde(default)]
    data: Vec<InstagramMedia>,
    /// Extractor-side failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    msg: Option<String>,
}

impl InstagramPayload {
    /// Create a payload.
    pub fn new(status: bool, data: Vec<InstagramMedia>, msg: Option<String>) -> Self {
        Self { status, data, msg }
    }

    /// The first usable media URL, if the extractor succeeded.
    pub fn video_url(&self) -> Option<&str> {
        if !self.status {
            return None;
        }
        self.data
            .first()
            .and_then(|media| media.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// A single Instagram media entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct InstagramMedia {
    /// Direct media URL
    #[serde(default)]
    url: Option<String>,
    /// Thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail: Option<String>,
}

impl InstagramMedia {
    /// Create a media entry.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            thumbnail: None,
        }
    }
}

/// Facebook extractor response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FacebookPayload {
    /// Standard-definition URL
    #[serde(default)]
    sd: Option<String>,
    /// High-definition URL
    #[serde(default)]
    hd: Option<String>,
}

impl FacebookPayload {
    /// Create a payload.
    pub fn new(sd: Option<String>, hd: Option<String>) -> Self {
        Self { sd, hd }
    }

    /// Standard definition first, high definition as fallback.
    pub fn video_url(&self) -> Option<&str> {
        fn usable(url: &Option<String>) -> Option<&str> {
            url.as_deref().filter(|url| !url.is_empty())
        }
        usable(&self.sd).or_else(|| usable(&self.hd))
    }
}

/// TikTok extractor response.
///
/// `{ "status": "success", "result": { "video": "..." } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TikTokPayload {
    /// `"success"` or `"error"`
    #[serde(default)]
    status: String,
    /// Extraction result
    #[serde(default)]
    result: Option<TikTokResult>,
}

impl TikTokPayload {
    /// Create a payload.
    pub fn new(status: impl Into<String>, video: Option<String>) -> Self {
        Self {
            status: status.into(),
            result: Some(TikTokResult { video }),
        }
    }

    /// The video URL, if the extractor reported success.
    pub fn video_url(&self) -> Option<&str> {
        if self.status != "success" {
            return None;
        }
        self.result
            .as_ref()
            .and_then(|result| result.video.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Body of a TikTok extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TikTokResult {
    /// Direct video URL
    #[serde(default)]
    video: Option<String>,
}
