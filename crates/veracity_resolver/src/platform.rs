//! Platform detection.

/// Source platform of a media URL.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Platform {
    /// instagram.com
    #[display("Instagram")]
    Instagram,
    /// facebook.com and fb.watch
    #[display("Facebook")]
    Facebook,
    /// tiktok.com
    #[display("TikTok")]
    TikTok,
    /// Anything else, assumed to already point at media bytes
    #[display("Direct")]
    Direct,
}

impl Platform {
    /// Select the platform for a URL.
    ///
    /// Case-insensitive substring match, first match wins in the order
    /// Instagram, Facebook, TikTok.
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_resolver::Platform;
    ///
    /// assert_eq!(Platform::detect("https://www.TikTok.com/@x/video/1"), Platform::TikTok);
    /// assert_eq!(Platform::detect("https://cdn.example.com/a.mp4"), Platform::Direct);
    /// ```
    pub fn detect(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("instagram.com") {
            Platform::Instagram
        } else if url.contains("facebook.com") || url.contains("fb.watch") {
            Platform::Facebook
        } else if url.contains("tiktok.com") {
            Platform::TikTok
        } else {
            Platform::Direct
        }
    }
}
