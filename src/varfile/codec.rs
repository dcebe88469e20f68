//! Line codec for var-files.
//!
//! A var-file line holds zero or more `KEY=VALUE` assignments separated by
//! `;`. Keys are identifiers; values are single-quoted, double-quoted, or an
//! unquoted run of non-whitespace other than `;`. An unquoted value may hold
//! quote characters as long as it does not start with one. Lines starting with `#` are comments.
//!
//! ```text
//! # exported by request-file
//! TOKEN='abc 123'
//! HOST=localhost; PORT="8080"
//! ```
//!
//! Encoding always produces the single-quoted form and does not escape
//! embedded single quotes, so a value containing `'` will not decode back to
//! itself.

use super::VarFileError;
use once_cell::sync::Lazy;
use regex::Regex;

/// One assignment: optional leading whitespace, key, `=`, value, then optional
/// whitespace and either a `;` separator or the end of the input.
static ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([A-Za-z_][A-Za-z0-9_]*)=(?:'([^']*)'|"([^"]*)"|([^\s;'"][^\s;]*)?)\s*(?:;|$)"#)
        .expect("Failed to compile var-file entry regex")
});

/// Returns true when the first non-whitespace character is `#`.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Decodes every assignment on a single line.
///
/// Scanning stops at the first segment that is not a complete assignment, so
/// `KEY=VALUE1 ;VALUE2` yields only `KEY`, and `KEY=VALUE1 VALUE2` yields
/// nothing at all.
pub fn decode_line(line: &str) -> Vec<(String, String)> {
    if is_comment(line) {
        return Vec::new();
    }

    let mut entries = Vec::new();
    let mut rest = line;

    while let Some(caps) = ENTRY_REGEX.captures(rest) {
        let Some(whole) = caps.get(0) else { break };
        let key = caps.get(1).map_or("", |m| m.as_str());
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());

        entries.push((key.to_string(), value.to_string()));

        rest = &rest[whole.end()..];
        if rest.trim().is_empty() {
            break;
        }
    }

    entries
}

/// Decodes every assignment in a multi-line text, in file order.
pub fn decode(text: &str) -> Vec<(String, String)> {
    text.lines().flat_map(decode_line).collect()
}

/// Reads exactly one assignment from a line.
///
/// Unlike [`decode_line`], finding no assignment is an error. When a line
/// holds several assignments the first one is returned.
///
/// # Examples
///
/// ```
/// use request_file::varfile::read_var;
///
/// assert_eq!(read_var("  KEY='VALUE1  VALUE2'").unwrap(), ("KEY".to_string(), "VALUE1  VALUE2".to_string()));
/// assert!(read_var("KEY =VALUE").is_err());
/// ```
pub fn read_var(line: &str) -> Result<(String, String), VarFileError> {
    if is_comment(line) {
        return Err(VarFileError::Comment);
    }

    decode_line(line)
        .into_iter()
        .next()
        .ok_or_else(|| VarFileError::NoEntry(line.trim().to_string()))
}

/// Encodes one assignment in single-quoted form.
pub fn write_var(key: &str, value: &str) -> String {
    format!("{}='{}'", key, value)
}
