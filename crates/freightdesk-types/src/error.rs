//! Error types for freightdesk

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while talking to the REST backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credential missing, expired or refused (401/403)
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Request never produced a response (connect failure, timeout)
    #[error("Network error: {0}")]
    Transport(String),

    /// Server answered with a failure; message is passed through verbatim
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// Server answered 2xx but the body was not what we expected
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Transport failures may succeed on a later attempt; everything else needs
    /// the user to change something first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Request refused locally before anything was sent
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
