//! HTTP request execution configuration.

use crate::config::Settings;
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Maximum time to wait for a complete response (connection, headers and
    /// body download).
    pub timeout: Duration,

    pub follow_redirects: bool,

    /// Only used when `follow_redirects` is true.
    pub max_redirects: u32,

    pub validate_ssl: bool,
}

impl ExecutionConfig {
    /// Builds the execution config from user settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            timeout: settings.timeout_duration(),
            follow_redirects: settings.follow_redirects,
            max_redirects: settings.max_redirects,
            validate_ssl: settings.validate_ssl,
        }
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
