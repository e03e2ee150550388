//! Client error types.
//!
//! [`ClientError`] is the single error type returned by every fallible
//! operation in this crate. It wraps transport, envelope, and message
//! parsing errors into a unified enum.

use hoppielink_models::ParseError;

/// Error type for all connector and API operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failure (connection, status, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A message or record failed typed parsing.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The service's response envelope was malformed (bad status word,
    /// unbalanced braces, truncated record).
    #[error("malformed service response: {reason}")]
    Response {
        /// What was wrong with the envelope.
        reason: String,
    },

    /// The service reported an error (`error {reason}` response).
    #[error("service error: {reason}")]
    Server {
        /// The reason returned by the service.
        reason: String,
    },
}

impl ClientError {
    /// Shorthand for a [`ClientError::Response`].
    pub(crate) fn response(reason: impl Into<String>) -> Self {
        ClientError::Response {
            reason: reason.into(),
        }
    }
}
