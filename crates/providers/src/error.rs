//! Error types for the HTTP providers.

use thiserror::Error;

/// Errors that can occur when talking to an external provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// API request failed.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the API.
        message: String,
    },

    /// The API answered with a redirect, which public market-data
    /// endpoints never legitimately do.
    #[error("unexpected redirect {status_code} -> {location}")]
    UnexpectedRedirect {
        /// HTTP status code.
        status_code: u16,
        /// Redirect target, when present.
        location: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A required credential is not configured.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),
}

impl ProviderError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates an unexpected-redirect error.
    pub fn unexpected_redirect(status_code: u16, location: impl Into<String>) -> Self {
        Self::UnexpectedRedirect {
            status_code,
            location: location.into(),
        }
    }

    /// Creates a missing-credentials error.
    pub fn missing_credentials(what: impl Into<String>) -> Self {
        Self::MissingCredentials(what.into())
    }

    /// Returns true if retrying the request later could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
