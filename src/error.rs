use thiserror::Error;

/// Failure reported by a [`Fetcher`](crate::fetchers::Fetcher)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    /// HTTP status, `None` for connection-level failures
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    /// The server answered with a non-success status
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// No usable HTTP response (connect error, timeout, broken body)
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// Why a page could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("post not found")]
    NotFound,

    #[error("access denied")]
    Forbidden,

    #[error("rate limited")]
    RateLimited,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
}

impl From<FetchError> for TransportFailure {
    fn from(err: FetchError) -> Self {
        match err.status {
            Some(404) => TransportFailure::NotFound,
            Some(401) | Some(403) => TransportFailure::Forbidden,
            Some(429) => TransportFailure::RateLimited,
            Some(code) => TransportFailure::UnexpectedStatus(code),
            None => TransportFailure::NetworkError(err.message),
        }
    }
}

/// Errors returned by [`MediaExtractor`](crate::MediaExtractor)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("not a post URL: {0}")]
    InvalidInput(String),

    #[error("failed to fetch page: {0}")]
    Transport(#[from] TransportFailure),

    #[error("no media found on page: {0}")]
    ExtractionFailed(String),
}
