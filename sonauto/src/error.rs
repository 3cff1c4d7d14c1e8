//! Error types for the Sonauto API client.

use thiserror::Error;

/// Result type alias for Sonauto operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Sonauto API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API error returned by Sonauto.
    #[error("sonauto: {message} (http_status={http_status})")]
    Api { message: String, http_status: u16 },

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Task reached the terminal failure status.
    #[error("task failed: {0}")]
    TaskFailed(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a new API error.
    pub fn api(message: impl Into<String>, http_status: u16) -> Self {
        Error::Api {
            message: message.into(),
            http_status,
        }
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Api { http_status, .. } => *http_status == 401 || *http_status == 403,
            _ => false,
        }
    }

    /// Returns true if this is a server-side error.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { http_status, .. } => *http_status >= 500,
            _ => false,
        }
    }
}
