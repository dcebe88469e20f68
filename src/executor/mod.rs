//! HTTP request executor.
//!
//! The rest of the crate talks to the network only through [`HttpClient`],
//! so runs can be tested against a stub. [`NativeClient`] is the real
//! implementation.

pub mod config;
pub mod error;
pub mod native;

pub use config::ExecutionConfig;
pub use error::RequestError;
pub use native::NativeClient;

use crate::models::{HttpRequest, HttpResponse};

/// Sends one request and returns the complete response.
///
/// Non-2xx statuses are responses, not errors.
pub trait HttpClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        (**self).send(request)
    }
}
