//! Data models for templates, requests and responses.
//!
//! This module contains the core data structures passed between resolution,
//! dispatch and export.

pub mod headers;
pub mod request;
pub mod response;
pub mod template;
pub mod value;

pub use headers::HeaderMap;
pub use request::HttpRequest;
pub use response::HttpResponse;
pub use template::{Body, ParamValue, Replacement, Template, TemplateError};
pub use value::{stringify_json_scalar, ReplacementType, ResolvedValue, ValueParseError};
