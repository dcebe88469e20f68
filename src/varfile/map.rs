//! Insertion-ordered key/value map used for history namespaces, persisted
//! exports and the environment overlay.

use super::codec::write_var;

/// An ordered string map. Updating an existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarMap {
    entries: Vec<(String, String)>,
}

impl VarMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Inserts or updates `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Renders one `key='value'` line per entry followed by a blank line.
    pub fn to_var_file(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(&write_var(key, value));
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for VarMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VarMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = VarMap::new();
        map.extend(iter);
        map
    }
}
