//! `request-file` entry point.
//!
//! Parses arguments, runs every template file and maps the outcome to an
//! exit status: `0` when every file succeeded, `1` otherwise. Logging goes
//! to stderr (`RUST_LOG`, default `warn`) so stdout only carries output.

use request_file::cli::Cli;
use request_file::commands;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(summary) => {
            for failure in &summary.failures {
                eprintln!("Error: {}: {}", failure.path.display(), failure.error);
            }
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
