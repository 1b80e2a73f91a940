//! Error types for outbound backend calls.

use thiserror::Error;

/// Backend client error.
#[derive(Error, Debug)]
pub enum Error {
    /// The request itself failed (connect, TLS, body decode). Carries the
    /// original `reqwest` error untouched.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL or path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-2xx status.
    #[error("API request failed ({status})")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
    },
}

/// Result type alias for backend calls.
pub type Result<T> = std::result::Result<T, Error>;
