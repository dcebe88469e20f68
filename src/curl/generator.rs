//! cURL command generator.
//!
//! Converts a resolved [`HttpRequest`] into a single-line cURL command that
//! sends the same request. Arguments are single-quoted where the shell would
//! otherwise interpret them.

use crate::models::HttpRequest;

/// Options for cURL command generation.
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    /// Include `-L` so cURL follows redirects like the client does.
    pub follow_redirects: bool,
    /// Include `-k` when certificate validation is disabled.
    pub insecure: bool,
}

/// Generates a single-line cURL command from an HttpRequest.
///
/// The method is always given explicitly, headers keep their order, and an
/// empty body is omitted.
///
/// # Examples
///
/// ```
/// use request_file::curl::{generate_curl_command, CurlOptions};
/// use request_file::models::HttpRequest;
///
/// let mut request = HttpRequest::new("POST", "https://api.example.com/cats");
/// request.headers.insert("Content-Type", "application/json");
/// request.body = Some(r#"{"name":"Felix"}"#.to_string());
///
/// let options = CurlOptions { follow_redirects: true, ..CurlOptions::default() };
/// assert_eq!(
///     generate_curl_command(&request, &options),
///     r#"curl -X POST -H 'Content-Type: application/json' -d '{"name":"Felix"}' -L https://api.example.com/cats"#
/// );
/// ```
pub fn generate_curl_command(request: &HttpRequest, options: &CurlOptions) -> String {
    let mut parts = vec!["curl".to_string()];

    parts.push(format!("-X {}", escape_shell_arg(&request.method)));

    for (name, value) in request.headers.iter() {
        parts.push(format!(
            "-H {}",
            escape_shell_arg(&format!("{}: {}", name, value))
        ));
    }

    if let Some(body) = request.body.as_deref().filter(|b| !b.is_empty()) {
        parts.push(format!("-d {}", escape_shell_arg(body)));
    }

    if options.insecure {
        parts.push("-k".to_string());
    }
    if options.follow_redirects {
        parts.push("-L".to_string());
    }

    // URL is always last
    parts.push(escape_shell_arg(&request.url));

    parts.join(" ")
}

/// Escapes a string for safe use in shell commands.
///
/// Uses single quotes for safety, escaping any embedded single quotes.
fn escape_shell_arg(arg: &str) -> String {
    if needs_quoting(arg) {
        // Replace ' with '\''
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

/// Checks if a string needs quoting for shell safety.
fn needs_quoting(s: &str) -> bool {
    let special_chars = [
        ' ', '\t', '\n', '\r', '|', '&', ';', '<', '>', '(', ')', '$', '`', '\\', '"', '\'', '*',
        '?', '[', ']', '#', '~', '=', '%', '{', '}', '!',
    ];

    s.is_empty() || s.chars().any(|c| special_chars.contains(&c))
}
