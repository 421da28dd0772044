use crate::config::ExtractorConfig;
use crate::error::FetchError;
use crate::fetchers::Fetcher;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, redirect};

/// Fetches pages over HTTP(S) with browser-like headers
///
/// Redirects are followed up to the configured limit, gzip/deflate/brotli
/// bodies are decoded and server certificates are verified.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: ExtractorConfig,
}

impl HttpFetcher {
    /// Build a fetcher from configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .default_headers(build_headers(&config))
            .timeout(config.timeout())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        ::log::debug!("FETCH: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ::log::error!("Timeout fetching: {}", url);
                FetchError::network(format!(
                    "request timed out after {}s",
                    self.config.timeout_secs
                ))
            } else {
                ::log::error!("Failed to fetch {}: {}", url, e);
                FetchError::network(format!("failed to fetch: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            ::log::warn!("HTTP {} for {}", status, url);
            return Err(FetchError::status(
                status.as_u16(),
                format!("HTTP error: {}", status),
            ));
        }

        if response.url().as_str() != url {
            ::log::debug!("Redirected to {}", response.url());
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(format!("failed to read body: {}", e)))?;

        ::log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Converts configured headers into a header map, skipping invalid entries
fn build_headers(config: &ExtractorConfig) -> HeaderMap {
    let mut map = HeaderMap::new();

    for (name, value) in config.headers() {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => ::log::warn!("Skipping invalid header: {}", name),
        }
    }

    map
}
