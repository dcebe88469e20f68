//! HTTP response formatter.
//!
//! Renders a response in one of three shapes:
//!
//! - `body`: the body, pretty-printed when it is JSON,
//! - `verbose`: status line, headers and body,
//! - `requests-mock`: a JSON record of the exchange that a mocking library
//!   can replay (see [`mock`]).

pub mod mock;

pub use mock::MockRecord;

use crate::models::{HttpRequest, HttpResponse};
use clap::ValueEnum;
use std::fmt;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Response body only.
    #[default]
    Body,
    /// Status line, headers and body.
    Verbose,
    /// Replayable JSON record of the request and response.
    RequestsMock,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Body => "body",
            Format::Verbose => "verbose",
            Format::RequestsMock => "requests-mock",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body as pretty JSON (2-space indent) when it parses, else as text.
pub fn format_body(response: &HttpResponse) -> String {
    response
        .json()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| response.text())
}

/// Renders `response` to `request` in the given format.
///
/// The result has no trailing newline.
pub fn format_response(request: &HttpRequest, response: &HttpResponse, format: Format) -> String {
    match format {
        Format::Body => format_body(response),
        Format::Verbose => {
            let mut lines = vec![format!(
                "Status: {} {}",
                response.status_code, response.status_text
            )];
            lines.extend(
                response
                    .headers
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, value)),
            );
            lines.push("Body:".to_string());
            lines.push(format_body(response));
            lines.join("\n")
        }
        Format::RequestsMock => MockRecord::new(request, response).to_pretty_json(),
    }
}
