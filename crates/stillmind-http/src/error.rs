//! HTTP error types for the Stillmind client

use stillmind_core::ApiError;
use thiserror::Error;

/// Errors surfaced by API calls.
///
/// `Api` is a business failure reported through the response envelope;
/// `Transport` is any failure before a response body was obtained (network,
/// timeout, TLS); `Malformed` is a body that parsed as no envelope at all.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed server response: {0}")]
    Malformed(String),

    #[error("download failed: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpError {
    /// The business error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            HttpError::Api(err) => Some(err),
            _ => None,
        }
    }
}
