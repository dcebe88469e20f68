//! Environment lookup for the second step of resolution.
//!
//! Replacements are looked up under `<namespace>_<name>` when a namespace is
//! active. Exported and imported values are layered over the real process
//! environment so a value exported by an earlier run is visible to the next.

use crate::varfile::VarMap;

/// A source of environment-style variables.
pub trait EnvSource {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for VarMap {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// An overlay consulted before a fallback source.
pub struct LayeredEnv<'a> {
    overlay: &'a VarMap,
    fallback: &'a dyn EnvSource,
}

impl<'a> LayeredEnv<'a> {
    pub fn new(overlay: &'a VarMap, fallback: &'a dyn EnvSource) -> Self {
        Self { overlay, fallback }
    }
}

impl EnvSource for LayeredEnv<'_> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.overlay
            .lookup(name)
            .or_else(|| self.fallback.lookup(name))
    }
}

/// Prefix applied to environment names for `namespace`: `"<namespace>_"`, or
/// empty when no namespace is active.
///
/// # Example
///
/// ```
/// use request_file::variables::env_prefix;
///
/// assert_eq!(env_prefix("staging"), "staging_");
/// assert_eq!(env_prefix(""), "");
/// ```
pub fn env_prefix(namespace: &str) -> String {
    if namespace.is_empty() {
        String::new()
    } else {
        format!("{}_", namespace)
    }
}
