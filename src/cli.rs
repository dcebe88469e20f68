//! Command-line arguments for `request-file`.
//!
//! Uses clap derive macros; the run itself lives in [`crate::commands`].

use crate::formatter::Format;
use crate::varfile::read_var;
use clap::Parser;
use std::path::PathBuf;

/// Send parameterized HTTP requests described by JSON template files.
///
/// Placeholders are filled from `--replace` values, then from the
/// environment (prefixed with `$REQUESTFILE_NAMESPACE_` when a namespace is
/// set), then from defaults and previous answers, then by prompting.
#[derive(Parser, Debug)]
#[command(name = "request-file")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Template files to send, in order.
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Explicit replacement value (`KEY=VALUE`, repeatable).
    #[arg(short = 'r', long = "replace", value_name = "KEY=VALUE", value_parser = parse_replacement)]
    pub replacements: Vec<(String, String)>,

    /// Output format for responses.
    #[arg(short, long, value_enum, default_value_t = Format::Body)]
    pub format: Format,

    /// Print an equivalent curl command for each request.
    #[arg(short = 'c', long)]
    pub print_curl: bool,

    /// Resolve templates without sending anything.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Print exported values as var-file lines.
    #[arg(short, long)]
    pub print_exports: bool,

    /// Also write formatted responses to FILE (repeatable).
    #[arg(short, long = "output", value_name = "FILE")]
    pub output_files: Vec<PathBuf>,

    /// Merge exported values into the var-file FILE (repeatable).
    #[arg(short, long = "exports", value_name = "FILE")]
    pub exports_files: Vec<PathBuf>,

    /// Var-file whose entries act as environment variables (repeatable).
    #[arg(short, long = "imports", value_name = "FILE")]
    pub imports: Vec<PathBuf>,

    /// Never prompt; fall back to defaults or leave placeholders in place.
    #[arg(short = 'n', long)]
    pub no_prompt: bool,

    /// Do not follow redirects.
    #[arg(long)]
    pub ignore_redirects: bool,

    /// Fail when a required replacement is left without a value.
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses a `KEY=VALUE` replacement with the var-file line reader.
fn parse_replacement(input: &str) -> Result<(String, String), String> {
    read_var(input).map_err(|_| "key is required".to_string())
}
