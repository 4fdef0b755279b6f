//! Error types for the EZID client.

use thiserror::Error;

/// Error type for every EZID operation.
///
/// A non-success HTTP response is never parsed: the service answers with
/// human-readable text, which is carried verbatim in [`ApiError::Rejected`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection, DNS, TLS, timeout) from reqwest
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Rejected by server (status {status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Raw response body, e.g. `error: bad request - no such identifier`
        body: String,
    },

    /// A success response whose first line is not `success: <identifier>`
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Scheme code outside the scheme table (`ark`, `doi`)
    #[error("Unknown scheme: {0}")]
    UnknownScheme(String),

    /// A metadata field expected in the record is absent
    #[error("Missing metadata field: {0}")]
    MissingField(String),

    /// A `_created`/`_updated` value that is not a Unix timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Raw body of a remote rejection, if this error is one.
    pub fn rejection_body(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for EZID operations.
pub type ApiResult<T> = Result<T, ApiError>;
