//! HTTP client error types.

use shelf_commerce::checkout::FieldError;
use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with an error status.
    ///
    /// `message` is the server's own message when it sent one.
    #[error("HTTP {status}: {message}")]
    HttpError {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// HTTP status of a server error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpError { status, .. } => Some(*status),
            ClientError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
