//! Resolution of social-media links to directly downloadable media URLs.
//!
//! The resolver dispatches on the URL to one [`Platform`], each backed by its
//! own [`ResolveStrategy`]. Platform strategies delegate the actual scraping
//! to an opaque [`Extractor`] and only interpret its payload.
//!
//! # Example
//!
//! ```rust
//! use veracity_resolver::{Platform, PlatformResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! assert_eq!(Platform::detect("https://fb.watch/abc"), Platform::Facebook);
//!
//! // No extractors configured: direct links still pass through.
//! let resolver = PlatformResolver::builder().build();
//! let url = resolver.resolve("https://cdn.example.com/clip.mp4").await?;
//! assert_eq!(url, "https://cdn.example.com/clip.mp4");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod extractor;
mod payload;
mod platform;
mod resolver;
mod strategy;

pub use config::ExtractorConfig;
pub use extractor::{Extractor, HttpExtractor};
pub use payload::{FacebookPayload, InstagramMedia, InstagramPayload, TikTokPayload, TikTokResult};
pub use platform::Platform;
pub use resolver::{PlatformResolver, PlatformResolverBuilder};
pub use strategy::{
    DirectStrategy, FacebookStrategy, InstagramStrategy, ResolveStrategy, TikTokStrategy,
};
pub use veracity_error::ResolutionError;
