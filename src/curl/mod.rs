//! cURL command generation for `--print-curl`.

pub mod generator;

pub use generator::{generate_curl_command, CurlOptions};
