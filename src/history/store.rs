//! Namespaced store of previously entered replacement values.
//!
//! The store is a var-file. A line assigning [`NAMESPACE_KEY`] switches the
//! namespace that the following entries belong to:
//!
//! ```text
//! REQUESTFILE_NAMESPACE=''
//! CAT_NAME='Felix'
//! REQUESTFILE_NAMESPACE='staging'
//! CAT_NAME='Tom'
//! ```

use crate::fs::{atomic_write_file, read_optional, StoreError};
use crate::varfile::{decode_line, write_var, VarMap};
use log::debug;
use std::path::Path;

/// Sentinel key marking the active namespace for subsequent entries.
pub const NAMESPACE_KEY: &str = "REQUESTFILE_NAMESPACE";

/// In-memory history, grouped by namespace in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputHistory {
    namespaces: Vec<(String, VarMap)>,
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses store text. Entries before the first sentinel belong to the
    /// default (empty) namespace.
    pub fn parse(text: &str) -> Self {
        let mut history = Self::new();
        history.merge_text(text);
        history
    }

    /// Loads the store at `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let history = match read_optional(path)? {
            Some(text) => Self::parse(&text),
            None => {
                debug!("No history at {}, starting empty", path.display());
                Self::new()
            }
        };
        Ok(history)
    }

    /// Merges entries from store text into this history, later values winning.
    pub fn merge_text(&mut self, text: &str) {
        let mut namespace = String::new();
        for line in text.lines() {
            for (key, value) in decode_line(line) {
                if key == NAMESPACE_KEY {
                    namespace = value;
                } else {
                    self.set(&namespace, key, value);
                }
            }
        }
    }

    /// Returns the stored value, or `""` when absent.
    pub fn get_last_input(&self, namespace: &str, name: &str) -> &str {
        self.lookup(namespace, name).unwrap_or("")
    }

    pub fn lookup(&self, namespace: &str, name: &str) -> Option<&str> {
        self.namespace(namespace).and_then(|vars| vars.get(name))
    }

    pub fn namespace(&self, namespace: &str) -> Option<&VarMap> {
        self.namespaces
            .iter()
            .find(|(ns, _)| ns == namespace)
            .map(|(_, vars)| vars)
    }

    pub fn set(&mut self, namespace: &str, name: impl Into<String>, value: impl Into<String>) {
        let vars = match self.namespaces.iter().position(|(ns, _)| ns == namespace) {
            Some(index) => &mut self.namespaces[index].1,
            None => {
                self.namespaces.push((namespace.to_string(), VarMap::new()));
                let last = self.namespaces.len() - 1;
                &mut self.namespaces[last].1
            }
        };
        vars.insert(name, value);
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.iter().all(|(_, vars)| vars.is_empty())
    }

    /// Renders the store: a sentinel line per namespace followed by its
    /// entries, then one trailing blank line.
    pub fn to_file_string(&self) -> String {
        let mut out = String::new();
        for (namespace, vars) in &self.namespaces {
            out.push_str(&write_var(NAMESPACE_KEY, namespace));
            out.push('\n');
            for (key, value) in vars.iter() {
                out.push_str(&write_var(key, value));
                out.push('\n');
            }
        }
        out.push('\n');
        out
    }

    /// Atomically replaces the store at `path`.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        atomic_write_file(path, &self.to_file_string())
    }
}
