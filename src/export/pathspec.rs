//! Typed path expressions into response bodies.
//!
//! A pathspec is `<type>:<path>`. The only type is `json`, whose path is a
//! `.`-separated list of components starting with `.`:
//!
//! ```text
//! json:.rootkey.2.otherkey.value
//! json:.3.otherkey.value
//! ```
//!
//! Against an array a component must be a non-negative index; against an
//! object it is a key. Components are taken literally, so `json:.` addresses
//! the key `""`.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported pathspec types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathspecType {
    Json,
}

impl PathspecType {
    pub const ALL: &'static [PathspecType] = &[PathspecType::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathspecType::Json => "json",
        }
    }

    fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|t| format!("'{}'", t.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PathspecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from parsing or evaluating a pathspec.
///
/// Walk errors carry the path up to and including the failing component,
/// and the value that component was applied to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathspecError {
    #[error("pathspec must start with 'type:' identifier")]
    MissingType,

    #[error("unsupported pathspec type '{found}'; valid values are {valid}")]
    UnsupportedType { found: String, valid: String },

    #[error("json pathspec must start with .")]
    MissingLeadingDot,

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("bad path '.{path}': '{index}' is not an array index ( {value} )")]
    InvalidIndex {
        path: String,
        index: String,
        value: Value,
    },

    #[error("bad path '.{path}': index out of range ( {value} )")]
    IndexOutOfRange { path: String, value: Value },

    #[error("bad path '.{path}': key not found ( {value} )")]
    MissingKey { path: String, value: Value },

    #[error("bad path '.{path}': cannot descend into {value}")]
    NotAContainer { path: String, value: Value },
}

impl PathspecError {
    /// Dotted path at which a walk failed, without the leading `.`.
    pub fn path(&self) -> Option<&str> {
        match self {
            PathspecError::InvalidIndex { path, .. }
            | PathspecError::IndexOutOfRange { path, .. }
            | PathspecError::MissingKey { path, .. }
            | PathspecError::NotAContainer { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Value observed at the parent of the failing component.
    pub fn observed(&self) -> Option<&Value> {
        match self {
            PathspecError::InvalidIndex { value, .. }
            | PathspecError::IndexOutOfRange { value, .. }
            | PathspecError::MissingKey { value, .. }
            | PathspecError::NotAContainer { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// A parsed pathspec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pathspec {
    pub kind: PathspecType,
    pub components: Vec<String>,
}

impl FromStr for Pathspec {
    type Err = PathspecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (kind, path) = spec.split_once(':').ok_or(PathspecError::MissingType)?;

        let kind = match kind {
            "json" => PathspecType::Json,
            other => {
                return Err(PathspecError::UnsupportedType {
                    found: other.to_string(),
                    valid: PathspecType::valid_values(),
                })
            }
        };

        let rest = path
            .strip_prefix('.')
            .ok_or(PathspecError::MissingLeadingDot)?;

        Ok(Pathspec {
            kind,
            components: rest.split('.').map(str::to_string).collect(),
        })
    }
}

impl Pathspec {
    /// Walks `root` and returns the addressed value.
    pub fn extract<'v>(&self, root: &'v Value) -> Result<&'v Value, PathspecError> {
        let mut current = root;

        for (depth, component) in self.components.iter().enumerate() {
            let path = || self.components[..=depth].join(".");

            current = match current {
                Value::Array(items) => {
                    let index: usize =
                        component
                            .parse()
                            .map_err(|_| PathspecError::InvalidIndex {
                                path: path(),
                                index: component.clone(),
                                value: current.clone(),
                            })?;
                    items.get(index).ok_or_else(|| PathspecError::IndexOutOfRange {
                        path: path(),
                        value: current.clone(),
                    })?
                }
                Value::Object(fields) => {
                    fields
                        .get(component)
                        .ok_or_else(|| PathspecError::MissingKey {
                            path: path(),
                            value: current.clone(),
                        })?
                }
                scalar => {
                    return Err(PathspecError::NotAContainer {
                        path: path(),
                        value: scalar.clone(),
                    })
                }
            };
        }

        Ok(current)
    }
}

/// Parses `pathspec` and evaluates it against the JSON document `text`.
///
/// # Example
///
/// ```
/// use request_file::export::read_pathspec;
/// use serde_json::json;
///
/// let body = r#"{"a": [{"b": "c"}]}"#;
/// assert_eq!(read_pathspec(body, "json:.a.0.b").unwrap(), json!("c"));
///
/// let err = read_pathspec(body, "json:.a.1.b").unwrap_err();
/// assert_eq!(err.path(), Some("a.1"));
/// ```
pub fn read_pathspec(text: &str, pathspec: &str) -> Result<Value, PathspecError> {
    let pathspec: Pathspec = pathspec.parse()?;
    let root: Value =
        serde_json::from_str(text).map_err(|e| PathspecError::InvalidJson(e.to_string()))?;
    pathspec.extract(&root).cloned()
}
