//! Failure taxonomy for backend calls.
//!
//! Every failure collapses into one of three cases, each with a
//! human-readable message so callers can show it to the user unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused
    /// connection, timeout, broken transfer).
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx status. `message` is the server's JSON `message` field when
    /// the error body carried one, otherwise a generic text with the code.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A 2xx response whose body was not the JSON we expected.
    #[error("malformed response body: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl ApiError {
    /// Message shown when a non-2xx response has no usable error body.
    pub fn generic_http(status: u16) -> Self {
        Self::Http {
            status,
            message: format!("request failed (HTTP {status})"),
        }
    }
}
