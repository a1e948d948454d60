//! Error types

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before or around a request.
///
/// Transport and HTTP failures are not errors here: they are reported as
/// [`ApiResult::Failure`](crate::transport::ApiResult) values so that every
/// outcome reaches the feedback area exactly once.
#[derive(Debug, Error)]
pub enum Error {
    /// Local validation failed; no request was issued
    #[error("{0}")]
    Validation(String),

    /// Base URL could not be parsed
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Returns true if the error was raised by pre-flight validation
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
