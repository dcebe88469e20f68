//! Request template model.
//!
//! A template is a JSON document describing one HTTP request plus the
//! replacements it accepts and the values it exports:
//!
//! ```json
//! {
//!   "replacements": { ":name": { "name": "CAT_NAME", "required": true } },
//!   "url": "https://myapi.net/api/v1/cats/:name",
//!   "method": "POST",
//!   "headers": { "Content-Type": "application/json" },
//!   "json": { "petTheCat": true },
//!   "exports": { "CAT_ID": "json:.id" }
//! }
//! ```
//!
//! Placeholder keys such as `:name` are literal tokens; they carry no syntax
//! of their own.

use super::headers::HeaderMap;
use super::value::{stringify_json_scalar, ReplacementType, ResolvedValue, ValueParseError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a template file.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// How one placeholder is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    /// Lookup name for explicit input, the environment and history.
    /// Defaults to the placeholder key.
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_required")]
    pub required: bool,

    /// Configured default. `Some(Value::String(""))` is a real default and
    /// differs from `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, rename = "type")]
    pub value_type: ReplacementType,
}

fn default_required() -> bool {
    true
}

impl Replacement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
            value_type: ReplacementType::String,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The configured default in text form.
    pub fn default_text(&self) -> Option<String> {
        self.default.as_ref().and_then(stringify_json_scalar)
    }

    pub fn parse_value(&self, raw: &str) -> Result<ResolvedValue, ValueParseError> {
        self.value_type.parse_value(raw)
    }
}

/// A query parameter: one value, or a list sent as repeated parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(value) => vec![value.as_str()],
            ParamValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Request body. When a file sets several body fields, `text` wins over
/// `data`, which wins over `json`.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Form(Map<String, Value>),
    Json(Value),
}

impl Body {
    /// Encodes the body as sent on the wire.
    pub fn encode(&self) -> String {
        match self {
            Body::Text(text) => text.clone(),
            Body::Form(fields) => encode_form(fields),
            Body::Json(value) => value.to_string(),
        }
    }

    /// Content type implied by the body variant, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Body::Text(_) => None,
            Body::Form(_) => Some("application/x-www-form-urlencoded"),
            Body::Json(_) => Some("application/json"),
        }
    }
}

fn encode_form(fields: &Map<String, Value>) -> String {
    let text = |value: &Value| stringify_json_scalar(value).unwrap_or_else(|| value.to_string());
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        match value {
            Value::Array(items) => {
                for item in items {
                    serializer.append_pair(key, &text(item));
                }
            }
            other => {
                serializer.append_pair(key, &text(other));
            }
        }
    }
    serializer.finish()
}

/// A parsed request template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplate", into = "RawTemplate")]
pub struct Template {
    /// Placeholder key to replacement, in file order.
    pub replacements: Vec<(String, Replacement)>,
    pub url: String,
    pub method: String,
    pub headers: HeaderMap,
    pub params: Vec<(String, ParamValue)>,
    pub body: Option<Body>,
    /// Export key to pathspec, in file order.
    pub exports: Vec<(String, String)>,
}

impl Template {
    /// A bare `GET` template for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            replacements: Vec::new(),
            url: url.into(),
            method: default_method(),
            headers: HeaderMap::new(),
            params: Vec::new(),
            body: None,
            exports: Vec::new(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and validates the template file at `path`.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| TemplateError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Encoded body, or `""` when there is none.
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Body::encode).unwrap_or_default()
    }
}

fn default_method() -> String {
    "GET".to_string()
}

/// The on-disk JSON shape. Every field stays a raw `Value` so a type error
/// can be reported against the field it came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawTemplate {
    #[serde(default, skip_serializing_if = "is_absent")]
    replacements: Value,
    #[serde(default)]
    url: Value,
    #[serde(default, skip_serializing_if = "is_absent")]
    method: Value,
    #[serde(default, skip_serializing_if = "is_absent")]
    headers: Value,
    #[serde(default, skip_serializing_if = "is_absent")]
    params: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    text: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    json: Value,
    #[serde(default, skip_serializing_if = "is_absent")]
    exports: Value,
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Converts a top-level field; `null` or a missing field yields the default.
fn section<T: DeserializeOwned + Default>(name: &str, value: Value) -> Result<T, String> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|e| format!("{}: {}", name, e))
}

fn field<T: DeserializeOwned>(section: &str, key: &str, value: Value) -> Result<T, String> {
    serde_json::from_value(value).map_err(|e| format!("{}.{}: {}", section, key, e))
}

impl TryFrom<RawTemplate> for Template {
    type Error = String;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        let url: Option<String> = section("url", raw.url)?;
        let url = url.ok_or_else(|| "url: missing required field".to_string())?;
        let method: Option<String> = section("method", raw.method)?;
        let method = method.unwrap_or_else(default_method);

        let raw_replacements: Map<String, Value> = section("replacements", raw.replacements)?;
        let mut replacements = Vec::with_capacity(raw_replacements.len());
        for (key, value) in raw_replacements {
            let mut replacement: Replacement = field("replacements", &key, value)?;
            if replacement.name.is_empty() {
                replacement.name = key.clone();
            }
            if matches!(replacement.default, Some(Value::Array(_) | Value::Object(_))) {
                return Err(format!(
                    "replacements.{}.default: must be a string, number or boolean",
                    key
                ));
            }
            replacements.push((key, replacement));
        }

        let raw_headers: Map<String, Value> = section("headers", raw.headers)?;
        let mut headers = HeaderMap::new();
        for (name, value) in raw_headers {
            let value: String = field("headers", &name, value)?;
            headers.insert(name, value);
        }

        let raw_params: Map<String, Value> = section("params", raw.params)?;
        let mut params = Vec::with_capacity(raw_params.len());
        for (name, value) in raw_params {
            let value: ParamValue = field("params", &name, value)?;
            params.push((name, value));
        }

        let raw_exports: Map<String, Value> = section("exports", raw.exports)?;
        let mut exports = Vec::with_capacity(raw_exports.len());
        for (key, value) in raw_exports {
            let pathspec: String = field("exports", &key, value)?;
            exports.push((key, pathspec));
        }

        let text: Option<String> = section("text", raw.text)?;
        let data: Option<Map<String, Value>> = section("data", raw.data)?;
        let json = Some(raw.json).filter(|value| !value.is_null());
        let body = match (text, data, json) {
            (Some(text), _, _) => Some(Body::Text(text)),
            (None, Some(data), _) => Some(Body::Form(data)),
            (None, None, Some(json)) => Some(Body::Json(json)),
            (None, None, None) => None,
        };

        Ok(Template {
            replacements,
            url,
            method,
            headers,
            params,
            body,
            exports,
        })
    }
}

impl From<Template> for RawTemplate {
    fn from(template: Template) -> Self {
        let to_value = |replacement: Replacement| {
            serde_json::to_value(replacement).unwrap_or(Value::Null)
        };
        let mut raw = RawTemplate {
            replacements: Value::Object(
                template
                    .replacements
                    .into_iter()
                    .map(|(key, replacement)| (key, to_value(replacement)))
                    .collect(),
            ),
            url: Value::String(template.url),
            method: Value::String(template.method),
            headers: Value::Object(
                template
                    .headers
                    .into_iter()
                    .map(|(name, value)| (name, Value::String(value)))
                    .collect(),
            ),
            params: Value::Object(
                template
                    .params
                    .into_iter()
                    .map(|(name, value)| {
                        let value = match value {
                            ParamValue::Single(v) => Value::String(v),
                            ParamValue::Multiple(vs) => vs.into_iter().map(Value::String).collect(),
                        };
                        (name, value)
                    })
                    .collect(),
            ),
            exports: Value::Object(
                template
                    .exports
                    .into_iter()
                    .map(|(key, pathspec)| (key, Value::String(pathspec)))
                    .collect(),
            ),
            ..RawTemplate::default()
        };
        match template.body {
            Some(Body::Text(text)) => raw.text = Value::String(text),
            Some(Body::Form(data)) => raw.data = Value::Object(data),
            Some(Body::Json(json)) => raw.json = json,
            None => {}
        }
        raw
    }
}
