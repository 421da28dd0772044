use crate::config::ExtractorConfig;
use crate::error::{ExtractError, TransportFailure};
use crate::fetchers::{Fetcher, HttpFetcher};
use crate::parsers::Parser;
use crate::results::MediaRecord;
use crate::validator;

/// Validates a post URL, fetches the page and extracts its media
///
/// The extractor holds no per-call state, so one instance can serve
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct MediaExtractor<F = HttpFetcher> {
    fetcher: F,
}

impl MediaExtractor<HttpFetcher> {
    /// Create an extractor that fetches over HTTP with default settings
    pub fn new() -> Result<Self, ExtractError> {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create an extractor that fetches over HTTP with the given settings
    pub fn with_config(config: ExtractorConfig) -> Result<Self, ExtractError> {
        let fetcher = HttpFetcher::new(config).map_err(|e| {
            ::log::error!("Failed to build HTTP client: {}", e);
            TransportFailure::NetworkError(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self::with_fetcher(fetcher))
    }
}

impl<F: Fetcher> MediaExtractor<F> {
    /// Create an extractor around any page fetcher
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Extract the media of a single post
    ///
    /// # Errors
    ///
    /// * [`ExtractError::InvalidInput`] if `url` is not a post, reel or tv link
    /// * [`ExtractError::Transport`] if the page could not be retrieved
    /// * [`ExtractError::ExtractionFailed`] if the page held no recognizable
    ///   media, typically a private or deleted post
    pub async fn download(&self, url: &str) -> Result<MediaRecord, ExtractError> {
        let url = url.trim();
        let Some(shortcode) = validator::shortcode(url) else {
            ::log::warn!("Rejected invalid post URL: {}", url);
            return Err(ExtractError::InvalidInput(url.to_string()));
        };

        ::log::info!("Extracting media for post {}", shortcode);

        let page = self.fetcher.fetch(url).await.map_err(|e| {
            ::log::warn!("Fetch failed for {}: {}", url, e);
            TransportFailure::from(e)
        })?;

        match Self::extract_from_page(&page) {
            Some(record) => {
                ::log::info!(
                    "Post {} resolved to {:?} media via {:?}",
                    shortcode,
                    record.media_type,
                    record.source
                );
                Ok(record)
            }
            None => {
                ::log::warn!("No media found for post {}", shortcode);
                Err(ExtractError::ExtractionFailed(url.to_string()))
            }
        }
    }

    /// Alias of [`download`](Self::download)
    pub async fn get_media_info(&self, url: &str) -> Result<MediaRecord, ExtractError> {
        self.download(url).await
    }

    /// Run both extraction stages on an already fetched page
    pub fn extract_from_page(page: &str) -> Option<MediaRecord> {
        Parser::extract(page)
    }
}
