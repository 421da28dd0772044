use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;

/// Retrieves the raw text of a page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return the decoded body of a successful response
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}
