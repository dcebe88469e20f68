//! Configuration schema for request-file.
//!
//! This module defines the settings structure and validation logic for all
//! user-configurable behaviour.

use crate::models::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// User settings, read from `config.json`.
///
/// Missing settings fall back to sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Request timeout in milliseconds.
    ///
    /// Maximum time to wait for a complete response (including connection,
    /// headers, and body download). Defaults to 30000ms (30 seconds).
    ///
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    ///
    /// `--ignore-redirects` turns this off for a single run.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate SSL/TLS certificates. Defaults to true.
    ///
    /// **Warning:** Disabling SSL validation can expose you to security risks.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Headers added to every request unless the template sets the same
    /// header. Defaults to a `User-Agent` header only.
    #[serde(default = "default_headers")]
    pub default_headers: BTreeMap<String, String>,

    /// Treat a required replacement that ends up without a value as an error
    /// instead of sending the request with the placeholder in place.
    #[serde(default)]
    pub strict_required: bool,

    /// Directory holding the input history and persisted exports. Defaults
    /// to the platform state directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            default_headers: default_headers(),
            strict_required: false,
            state_dir: None,
        }
    }
}

impl Settings {
    /// Validates the settings and returns a description of the first
    /// invalid one.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if let Some((name, _)) = self
            .default_headers
            .iter()
            .find(|(name, _)| name.trim().is_empty())
        {
            return Err(format!("defaultHeaders contains an empty header name '{}'", name));
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Default headers as a request header map.
    pub fn header_map(&self) -> HeaderMap {
        self.default_headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

fn default_timeout() -> u64 {
    30000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("request-file/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
