//! HTTP response data model.

use super::headers::HeaderMap;
use serde_json::Value;
use std::time::Duration;

/// A response returned by an [`HttpClient`](crate::executor::HttpClient).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Reason phrase (e.g., "OK", "Not Found").
    pub status_text: String,

    /// URL the response came from, after any redirects.
    pub url: String,

    pub headers: HeaderMap,

    /// Response body as raw bytes; binary bodies are kept intact.
    pub body: Vec<u8>,

    /// Time from dispatch until the body was fully read.
    pub duration: Duration,
}

impl HttpResponse {
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            url: String::new(),
            headers: HeaderMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type")
    }

    /// Adds a header; repeated names are joined with `", "`.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.append(name, value);
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON, or `None` when it is not valid JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}
