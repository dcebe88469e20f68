//! Configuration loading and state locations.
//!
//! Settings come from a JSON file at `$REQUESTFILE_CONFIG`, or
//! `<config dir>/request-file/config.json`. A missing file means defaults.
//! The state directory holds the input history (`last-inputs`) and the
//! persisted exports (`environment`).

pub mod schema;

pub use schema::Settings;

use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application directory name under the platform config/state dirs.
pub const APP_NAME: &str = "request-file";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "REQUESTFILE_CONFIG";

/// Environment variable selecting the active namespace.
pub const NAMESPACE_ENV: &str = "REQUESTFILE_NAMESPACE";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine a state directory; set stateDir in {}", .0.display())]
    NoStateDir(PathBuf),
}

/// Loads settings from `path`.
///
/// A missing file yields defaults. A file that does not parse is reported
/// with a warning and also yields defaults. A file that parses but fails
/// validation is an error.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings = match serde_json::from_str::<Settings>(&text) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(
                "Failed to parse settings in {}: {}. Using defaults.",
                path.display(),
                e
            );
            return Ok(Settings::default());
        }
    };

    settings.validate().map_err(ConfigError::Invalid)?;
    Ok(settings)
}

/// Location of the config file.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("config.json")
}

/// Directory for history and persisted exports.
///
/// Uses `stateDir` when configured, then the platform state directory, then
/// the platform local data directory.
pub fn state_dir(settings: &Settings) -> Option<PathBuf> {
    if let Some(dir) = &settings.state_dir {
        return Some(dir.clone());
    }
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join(APP_NAME))
}

/// Namespace selected through [`NAMESPACE_ENV`], or `""`.
pub fn namespace_from_env() -> String {
    std::env::var(NAMESPACE_ENV).unwrap_or_default()
}
