//! Error types for the weather client.

use thiserror::Error;

/// Result type alias for weather client operations.
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Errors that can occur when fetching a forecast.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP transport failed or the provider returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded into the expected structure.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider reported a failure result code.
    #[error("provider error {code}: {message}")]
    Provider {
        /// Provider result code (anything other than `"00"`).
        code: String,
        /// Provider result message.
        message: String,
    },

    /// Client configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WeatherError {
    /// Returns `true` if retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
