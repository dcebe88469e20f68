//! Outbound HTTP request built from a resolved template.

use super::headers::HeaderMap;
use super::template::Template;
use serde::Serialize;

/// A fully materialised request, ready for an [`HttpClient`](crate::executor::HttpClient).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    /// Upper-cased method name.
    pub method: String,

    /// Final URL, including query parameters.
    pub url: String,

    pub headers: HeaderMap,

    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into().to_uppercase(),
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Builds the request for a resolved template.
    ///
    /// Query parameters are appended to the URL with list values repeated.
    /// `default_headers` fill in any header the template does not set, and a
    /// form or JSON body adds a matching `Content-Type` when none is present.
    ///
    /// # Errors
    ///
    /// Returns a parse error when parameters must be appended to a URL that
    /// does not parse. A URL without parameters is passed through untouched.
    pub fn from_template(
        template: &Template,
        default_headers: &HeaderMap,
    ) -> Result<Self, url::ParseError> {
        let url = if template.params.is_empty() {
            template.url.clone()
        } else {
            let mut url = url::Url::parse(&template.url)?;
            {
                let mut pairs = url.query_pairs_mut();
                for (name, value) in &template.params {
                    for v in value.values() {
                        pairs.append_pair(name, v);
                    }
                }
            }
            url.to_string()
        };

        let mut headers = template.headers.clone();
        for (name, value) in default_headers.iter() {
            headers.insert_default(name, value);
        }

        let body = template.body.as_ref().map(|body| {
            if let Some(content_type) = body.content_type() {
                headers.insert_default("Content-Type", content_type);
            }
            body.encode()
        });

        Ok(Self {
            method: template.method.to_uppercase(),
            url,
            headers,
            body,
        })
    }

    pub fn has_body(&self) -> bool {
        self.body.as_ref().map_or(false, |b| !b.is_empty())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type")
    }
}
