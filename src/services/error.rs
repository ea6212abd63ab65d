//! Provider-level failures

use std::time::Duration;

/// Errors from a single upstream provider call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no data for the requested symbol or series
    #[error("not found: {0}")]
    NotFound(String),

    /// 4xx other than 404; never retried (429 included)
    #[error("client error {status}: {message}")]
    Client { status: u16, message: String },

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("no API key configured for {0}")]
    MissingCredentials(&'static str),
}

impl ProviderError {
    /// Server-side and transport failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::Server { .. } | ProviderError::Timeout(_) | ProviderError::Network(_)
        )
    }

    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => ProviderError::NotFound(message),
            400..=499 => ProviderError::Client { status, message },
            _ => ProviderError::Server { status, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(Duration::ZERO)
        } else if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ProviderError::from_status(status.as_u16(), e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
