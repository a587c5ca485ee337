//! Error handling

use std::time::Duration;
use thiserror::Error;

/// Errors raised while talking to the Appclacks API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered 404
    #[error("Not found")]
    NotFound,

    /// Any other status >= 400, with the raw response body
    #[error("the API returned an error: status {status}\n{body}")]
    Api { status: u16, body: String },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The caller-supplied deadline elapsed before the call completed
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration (endpoint, TLS material)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound)
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::NotFound => Some(404),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Transport failures and deadline expiry
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Timeout(_))
    }
}
