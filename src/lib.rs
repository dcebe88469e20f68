//! Parameterized HTTP requests from JSON template files.
//!
//! A template describes one request: URL, method, headers, query
//! parameters, a body, the placeholders it accepts (`replacements`) and the
//! values to pull out of the response (`exports`). Running a template:
//!
//! 1. resolves each replacement from explicit input, the environment,
//!    defaults and input history, or an operator prompt,
//! 2. substitutes the resolved values into every string of the template,
//! 3. sends the request and prints the formatted response,
//! 4. evaluates the exports and stores them as var-file entries that later
//!    runs pick up as environment values.
//!
//! # Architecture
//!
//! - **varfile**: the `KEY='VALUE'` line format shared by all state files
//! - **history**: namespaced record of values the operator typed in
//! - **models**: templates, requests, responses and typed replacement values
//! - **variables**: substitution and the resolution precedence chain
//! - **export**: pathspec evaluation against response bodies
//! - **executor**: the HTTP client
//! - **formatter** / **curl**: response rendering and curl equivalents
//! - **config**: user settings and state locations
//! - **session** / **commands** / **cli**: one run of the command line
//!
//! # Example
//!
//! ```json
//! {
//!   "replacements": { ":name": { "name": "CAT_NAME" } },
//!   "url": "https://myapi.net/api/v1/cats/:name",
//!   "exports": { "CAT_ID": "json:.id" }
//! }
//! ```
//!
//! `request-file -r CAT_NAME=Felix cat.json` requests
//! `https://myapi.net/api/v1/cats/Felix` and exports the `id` field of the
//! response as `CAT_ID`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod curl;
pub mod executor;
pub mod export;
pub mod formatter;
pub mod fs;
pub mod history;
pub mod models;
pub mod session;
pub mod varfile;
pub mod variables;
