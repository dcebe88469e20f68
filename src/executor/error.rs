//! HTTP request execution error types.
//!
//! This module defines error types that can occur during HTTP request execution,
//! including network errors, timeouts, and protocol issues.

use thiserror::Error;

/// Errors that can occur during HTTP request execution.
///
/// A failed request only fails the template being processed; the remaining
/// files of the run are still sent.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out before completion.
    #[error("Request timed out")]
    Timeout,

    /// Invalid URL provided in the request.
    ///
    /// The URL could not be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// TLS/SSL error occurred during HTTPS connection.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// The method is not a valid HTTP token.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Request building error.
    ///
    /// Errors that occur when constructing the HTTP client or request, such as
    /// a header that is not valid on the wire.
    #[error("Request build error: {0}")]
    BuildError(String),
}

/// Convert reqwest errors to RequestError.
///
/// Maps reqwest's error types to our custom error variants for consistent
/// error handling throughout the application.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(message)
        } else if message.contains("certificate") || message.contains("TLS") || message.contains("SSL")
        {
            RequestError::TlsError(message)
        } else {
            RequestError::NetworkError(message)
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
