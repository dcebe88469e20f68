//! Placeholder substitution engine.
//!
//! Substitution replaces one literal placeholder token with a resolved value
//! everywhere it appears in a template. It never mutates its input; each call
//! returns a new value so resolutions can be folded one after another.
//!
//! Inside text the placeholder is replaced wherever it occurs. A JSON leaf
//! that is exactly the placeholder takes the typed value instead, so
//! `{"count": ":n"}` with an integer `3` becomes `{"count": 3}`.

use crate::models::{Body, HeaderMap, ParamValue, ResolvedValue, Template};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Structural substitution of one placeholder.
pub trait Substitute {
    #[must_use]
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self;
}

/// Replaces every occurrence of `placeholder` in `text`.
///
/// An empty placeholder matches nothing.
pub fn substitute_text(text: &str, placeholder: &str, value: &ResolvedValue) -> String {
    if placeholder.is_empty() || !text.contains(placeholder) {
        return text.to_string();
    }
    text.replace(placeholder, &value.to_text())
}

/// Substitutes into a JSON value.
///
/// Strings equal to the placeholder become the typed value; other strings
/// have occurrences replaced. Object keys and values are both substituted and
/// array elements are substituted in order. Numbers, booleans and null pass
/// through unchanged.
pub fn substitute_value(input: &Value, placeholder: &str, value: &ResolvedValue) -> Value {
    match input {
        Value::String(s) if !placeholder.is_empty() && s == placeholder => value.to_json(),
        Value::String(s) => Value::String(substitute_text(s, placeholder, value)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute_value(item, placeholder, value))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(substitute_object(fields, placeholder, value)),
        other => other.clone(),
    }
}

fn substitute_object(
    fields: &Map<String, Value>,
    placeholder: &str,
    value: &ResolvedValue,
) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| {
            (
                substitute_text(k, placeholder, value),
                substitute_value(v, placeholder, value),
            )
        })
        .collect()
}

impl Substitute for String {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        substitute_text(self, placeholder, value)
    }
}

impl Substitute for Value {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        substitute_value(self, placeholder, value)
    }
}

impl<T: Substitute> Substitute for Vec<T> {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        self.iter()
            .map(|item| item.substitute(placeholder, value))
            .collect()
    }
}

impl<T: Substitute> Substitute for Option<T> {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        self.as_ref().map(|inner| inner.substitute(placeholder, value))
    }
}

impl<V: Substitute> Substitute for (String, V) {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        (
            self.0.substitute(placeholder, value),
            self.1.substitute(placeholder, value),
        )
    }
}

impl Substitute for ParamValue {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        match self {
            ParamValue::Single(v) => ParamValue::Single(v.substitute(placeholder, value)),
            ParamValue::Multiple(vs) => ParamValue::Multiple(vs.substitute(placeholder, value)),
        }
    }
}

/// Header names are substituted too, so two headers may end up with the same
/// name. Their values are then joined rather than one being dropped.
impl Substitute for HeaderMap {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        let mut headers = HeaderMap::new();
        for (name, v) in self.iter() {
            let name = substitute_text(name, placeholder, value);
            if headers.contains(&name) {
                warn!(
                    "Header {} appears twice after substituting {}; joining values",
                    name, placeholder
                );
            }
            headers.append(name, substitute_text(v, placeholder, value));
        }
        headers
    }
}

impl Substitute for Body {
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        match self {
            Body::Text(text) => Body::Text(text.substitute(placeholder, value)),
            Body::Form(fields) => Body::Form(substitute_object(fields, placeholder, value)),
            Body::Json(json) => Body::Json(json.substitute(placeholder, value)),
        }
    }
}

impl Substitute for Template {
    /// Substitutes into the URL, headers, params and body.
    ///
    /// The method is replaced only when it is exactly the placeholder.
    /// Replacement declarations and export pathspecs are left untouched.
    fn substitute(&self, placeholder: &str, value: &ResolvedValue) -> Self {
        debug!("Substituting {} with '{}'", placeholder, value);
        let method = if !placeholder.is_empty() && self.method == placeholder {
            value.to_text()
        } else {
            self.method.clone()
        };

        Template {
            replacements: self.replacements.clone(),
            url: self.url.substitute(placeholder, value),
            method,
            headers: self.headers.substitute(placeholder, value),
            params: self.params.substitute(placeholder, value),
            body: self.body.substitute(placeholder, value),
            exports: self.exports.clone(),
        }
    }
}
