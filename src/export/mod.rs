//! Response exports.
//!
//! A template's `exports` map names values to pull out of the response body
//! with a [`Pathspec`]. Each export is evaluated on its own: a pathspec that
//! fails yields an empty value and does not affect the others.

pub mod pathspec;

pub use pathspec::{read_pathspec, Pathspec, PathspecError, PathspecType};

use crate::models::{stringify_json_scalar, Template};
use log::warn;
use serde_json::Value;

/// Text form of an exported value. Scalars use their plain text; arrays and
/// objects are written as compact JSON.
pub fn export_text(value: &Value) -> String {
    stringify_json_scalar(value).unwrap_or_else(|| value.to_string())
}

/// Evaluates one pathspec against an already parsed body.
pub fn extract(body: Result<&Value, &str>, pathspec: &str) -> Result<Value, PathspecError> {
    let pathspec: Pathspec = pathspec.parse()?;
    let root = body.map_err(|e| PathspecError::InvalidJson(e.to_string()))?;
    pathspec.extract(root).cloned()
}

/// Evaluates every export of `template` against `body`.
///
/// Returns `(<prefix><key>, value)` pairs in declaration order. Failed
/// exports are logged and exported as `""`.
pub fn collect_exports(template: &Template, body: &str, prefix: &str) -> Vec<(String, String)> {
    if template.exports.is_empty() {
        return Vec::new();
    }

    let parsed: Result<Value, String> = serde_json::from_str(body).map_err(|e| e.to_string());

    template
        .exports
        .iter()
        .map(|(key, pathspec)| {
            let value = match extract(parsed.as_ref().map_err(String::as_str), pathspec) {
                Ok(value) => export_text(&value),
                Err(e) => {
                    warn!("Export {} ({}) failed: {}", key, pathspec, e);
                    String::new()
                }
            };
            (format!("{}{}", prefix, key), value)
        })
        .collect()
}
