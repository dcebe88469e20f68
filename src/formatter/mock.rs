//! Replayable mock records.
//!
//! The record mirrors the keyword arguments of a `requests-mock` registration:
//! method, URL, status and reason, both header sets, and the response content
//! as exactly one of `json`, `text` (for `text/*` content types) or `content`
//! (base64 of the raw bytes).

use crate::models::{HeaderMap, HttpRequest, HttpResponse};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MockRecord {
    pub method: String,
    pub url: String,
    pub status_code: u16,
    pub reason: String,
    pub request_headers: HeaderMap,
    pub headers: HeaderMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MockRecord {
    pub fn new(request: &HttpRequest, response: &HttpResponse) -> Self {
        let url = if response.url.is_empty() {
            request.url.clone()
        } else {
            response.url.clone()
        };

        let mut record = Self {
            method: request.method.clone(),
            url,
            status_code: response.status_code,
            reason: response.status_text.clone(),
            request_headers: request.headers.clone(),
            headers: response.headers.clone(),
            json: None,
            text: None,
            content: None,
        };

        if let Some(json) = response.json() {
            record.json = Some(json);
        } else if media_type(response).starts_with("text/") {
            record.text = Some(response.text());
        } else {
            record.content = Some(STANDARD.encode(&response.body));
        }
        record
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Media type without parameters; responses without a content type count as
/// `text/plain`.
fn media_type(response: &HttpResponse) -> String {
    response
        .content_type()
        .unwrap_or("text/plain")
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}
