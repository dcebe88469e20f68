//! Typed replacement values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Declared type of a replacement; controls how its raw input is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
}

impl ReplacementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplacementType::String => "string",
            ReplacementType::Number => "number",
            ReplacementType::Integer => "integer",
            ReplacementType::Boolean => "boolean",
        }
    }

    /// Parses a raw input according to this type.
    ///
    /// Numbers and integers ignore surrounding whitespace. Booleans accept
    /// `true`/`1` and `false`/`0` in any case.
    pub fn parse_value(&self, raw: &str) -> Result<ResolvedValue, ValueParseError> {
        let invalid = || ValueParseError {
            expected: *self,
            value: raw.to_string(),
        };

        match self {
            ReplacementType::String => Ok(ResolvedValue::String(raw.to_string())),
            ReplacementType::Number => raw
                .trim()
                .parse::<f64>()
                .map(ResolvedValue::Number)
                .map_err(|_| invalid()),
            ReplacementType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(ResolvedValue::Integer)
                .map_err(|_| invalid()),
            ReplacementType::Boolean => match raw.to_lowercase().as_str() {
                "true" | "1" => Ok(ResolvedValue::Boolean(true)),
                "false" | "0" => Ok(ResolvedValue::Boolean(false)),
                _ => Err(invalid()),
            },
        }
    }
}

impl fmt::Display for ReplacementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw input that does not parse as its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {expected} value: '{value}'")]
pub struct ValueParseError {
    pub expected: ReplacementType,
    pub value: String,
}

/// The coerced value substituted for a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    String(String),
    Number(f64),
    Integer(i64),
    Boolean(bool),
}

impl ResolvedValue {
    /// Text form used inside string fields.
    ///
    /// Floats always carry a fractional part (`5` parsed as a number prints
    /// as `5.0`).
    pub fn to_text(&self) -> String {
        match self {
            ResolvedValue::String(s) => s.clone(),
            ResolvedValue::Number(n) => format!("{:?}", n),
            ResolvedValue::Integer(i) => i.to_string(),
            ResolvedValue::Boolean(b) => b.to_string(),
        }
    }

    /// JSON form used when a JSON leaf is exactly the placeholder.
    ///
    /// Non-finite floats have no JSON number form and become strings.
    pub fn to_json(&self) -> Value {
        match self {
            ResolvedValue::String(s) => Value::String(s.clone()),
            ResolvedValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(self.to_text())),
            ResolvedValue::Integer(i) => Value::from(*i),
            ResolvedValue::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for ResolvedValue {
    fn from(value: &str) -> Self {
        ResolvedValue::String(value.to_string())
    }
}

/// Text form of a JSON scalar: `null`, `true`/`false`, a number's literal or
/// a string's contents. Containers yield `None`.
pub fn stringify_json_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
