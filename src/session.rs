//! Process-scoped state: input history and exported values.
//!
//! A [`Session`] is opened once per run and closed at the end. History and
//! persisted exports are loaded on open and written back on close with
//! atomic replace-by-rename. If the session is dropped without being closed
//! (early return, fatal error, panic), `Drop` flushes instead so answers
//! typed during the run are not lost.

use crate::fs::{atomic_write_file, read_optional, StoreError};
use crate::history::InputHistory;
use crate::models::Template;
use crate::variables::{env_prefix, EnvSource, LayeredEnv, Prompter, Resolver, VarError};
use crate::varfile::{decode, VarMap};
use log::{debug, error, warn};
use std::path::{Path, PathBuf};

/// File name of the input history inside the state directory.
pub const HISTORY_FILE: &str = "last-inputs";

/// File name of the persisted exports inside the state directory.
pub const EXPORTS_FILE: &str = "environment";

/// Locations of the session's state files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub history: PathBuf,
    pub exports: PathBuf,
}

impl StatePaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            history: dir.join(HISTORY_FILE),
            exports: dir.join(EXPORTS_FILE),
        }
    }
}

pub struct Session {
    paths: StatePaths,
    namespace: String,
    pub history: InputHistory,
    /// Exports persisted across runs.
    exports: VarMap,
    /// Persisted and imported values consulted before the process
    /// environment.
    overlay: VarMap,
    closed: bool,
}

impl Session {
    /// Loads state from `paths` and layers the `imports` var-files on top.
    ///
    /// Unreadable state or import files are logged and skipped; a first run
    /// simply starts empty.
    pub fn open(paths: StatePaths, namespace: impl Into<String>, imports: &[PathBuf]) -> Self {
        let history = InputHistory::load(&paths.history).unwrap_or_else(|e| {
            warn!("Ignoring unreadable input history: {}", e);
            InputHistory::new()
        });

        let exports = load_var_file(&paths.exports);
        let mut overlay = exports.clone();
        for import in imports {
            overlay.extend(load_var_file(import).iter());
        }

        Self {
            paths,
            namespace: namespace.into(),
            history,
            exports,
            overlay,
            closed: false,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Prefix for exported and environment names in the active namespace.
    pub fn env_prefix(&self) -> String {
        env_prefix(&self.namespace)
    }

    pub fn exports(&self) -> &VarMap {
        &self.exports
    }

    /// Resolves `template` against explicit input, this session's
    /// environment view and its history.
    pub fn resolve(
        &mut self,
        template: &Template,
        explicit: &VarMap,
        process: &dyn EnvSource,
        prompter: &mut dyn Prompter,
        strict_required: bool,
    ) -> Result<Template, VarError> {
        let env = LayeredEnv::new(&self.overlay, process);
        Resolver::new(explicit, &env, &self.namespace, &mut self.history, prompter)
            .strict_required(strict_required)
            .resolve(template)
    }

    /// Records export results so later templates in this run and later runs
    /// see them.
    pub fn record_exports(&mut self, entries: &[(String, String)]) {
        for (key, value) in entries {
            self.overlay.insert(key.as_str(), value.as_str());
            self.exports.insert(key.as_str(), value.as_str());
        }
    }

    /// Writes history and exports to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        debug!(
            "Saving input history to {} and exports to {}",
            self.paths.history.display(),
            self.paths.exports.display()
        );
        self.history.save(&self.paths.history)?;
        atomic_write_file(&self.paths.exports, &self.exports.to_var_file())
    }

    /// Flushes and ends the session. A failure here is fatal for the run.
    pub fn close(mut self) -> Result<(), StoreError> {
        self.closed = true;
        self.flush()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.flush() {
            error!("Failed to save session state: {}", e);
        }
    }
}

/// Reads a var-file into a map, treating a missing or unreadable file as
/// empty.
fn load_var_file(path: &Path) -> VarMap {
    match read_optional(path) {
        Ok(Some(text)) => decode(&text).into_iter().collect(),
        Ok(None) => VarMap::new(),
        Err(e) => {
            warn!("Ignoring unreadable var-file: {}", e);
            VarMap::new()
        }
    }
}
