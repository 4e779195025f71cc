//! Error types for the relay.
//!
//! Every variant is turned into an HTTP response at the request boundary;
//! none of them ends the process.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Connect failure, DNS failure, timeout, or a backend connection dropped mid-response.
    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    /// The inbound request could not be turned into a forwarded one.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Reading the inbound body failed.
    #[error("IO error: {0}")]
    LocalIo(String),
}

impl RelayError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::BackendUnreachable(_) => "backend_unreachable",
            RelayError::MalformedRequest(_) => "malformed_request",
            RelayError::BodyTooLarge { .. } => "body_too_large",
            RelayError::LocalIo(_) => "local_io",
        }
    }
}
