//! Error types for the restaurant API client.
//!
//! # Design
//! Only unrecovered failures live here. Responses with a recognized status
//! (401, 404, 422, 500, 504) are handed back as ordinary values by
//! `RequestClient` and never become an `ApiError`. Everything that does land
//! here keeps the original failure intact: the transport error as reqwest
//! reported it, or the full non-2xx response.

use thiserror::Error;

/// Result type alias for client and service operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received: DNS failure, refused connection, timeout,
    /// or a URL the transport could not use.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 2xx that is not recovered.
    #[error("HTTP {status}: {body}")]
    HttpError {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },

    /// The request body could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required configuration variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}

impl ApiError {
    /// HTTP status of the attached response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Serialization(_) | ApiError::MissingEnvVar(_) => None,
        }
    }
}
