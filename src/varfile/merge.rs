//! In-place merge of assignments into an existing var-file.
//!
//! Lines that already define a key are rewritten where they stand; new keys
//! are appended. Comments, blank lines and unrelated entries are kept as they
//! are. A line's key is everything before its first `=`, taken verbatim, so
//! `  KEY=1` (with leading spaces) does not match `KEY`.

use super::codec::{is_comment, write_var};
use crate::fs::{atomic_write_file, read_optional, StoreError};
use std::collections::HashMap;
use std::path::Path;

/// Merges `entries` into the text of a var-file and returns the new text.
///
/// Trailing blank lines are collapsed into the single blank line every write
/// ends with, so merging the same entries twice yields the same text.
pub fn merge_entries<'a, I>(existing: &str, entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut lines: Vec<String> = existing.lines().map(str::to_string).collect();
    while lines.last().map_or(false, |line| line.trim().is_empty()) {
        lines.pop();
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    for (line_no, line) in lines.iter().enumerate() {
        if is_comment(line) {
            continue;
        }
        if let Some(eq) = line.find('=') {
            index.insert(line[..eq].to_string(), line_no);
        }
    }

    for (key, value) in entries {
        let line = write_var(key, value);
        match index.get(key) {
            Some(&line_no) => lines[line_no] = line,
            None => {
                index.insert(key.to_string(), lines.len());
                lines.push(line);
            }
        }
    }

    let mut out = String::new();
    for line in &lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Merges `entries` into the var-file at `path`, creating it if needed.
pub fn merge_file<'a, I>(path: &Path, entries: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let existing = read_optional(path)?.unwrap_or_default();
    let merged = merge_entries(&existing, entries);
    atomic_write_file(path, &merged)
}
