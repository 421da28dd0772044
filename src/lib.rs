//! Extracts the media URL of a public Instagram post without an API token.
//!
//! A post page is fetched once and searched for embedded JSON (page state,
//! lazily loaded data, linked data) and, failing that, for `og:` metadata
//! tags. The first usable media reference becomes a [`MediaRecord`].

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetchers;
pub mod parsers;
pub mod results;
pub mod utils;
pub mod validator;

// Re-export commonly used types for convenience
pub use config::ExtractorConfig;
pub use error::{ExtractError, FetchError, TransportFailure};
pub use extractor::MediaExtractor;
pub use fetchers::{Fetcher, HttpFetcher};
pub use results::{ExtractionSource, MediaRecord, MediaType};

/// Extract the media of a post using an HTTP fetcher with default settings
pub async fn download(url: &str) -> Result<MediaRecord, ExtractError> {
    MediaExtractor::new()?.download(url).await
}

/// Alias of [`download`]
pub async fn get_media_info(url: &str) -> Result<MediaRecord, ExtractError> {
    download(url).await
}

/// Determine if a string is a post, reel or tv link
pub fn is_valid_url(url: &str) -> bool {
    validator::is_valid(url)
}
