//! Run orchestration.
//!
//! Each template file goes through the same steps, one file at a time:
//! load, resolve replacements, build the request, optionally print a curl
//! equivalent, then (unless this is a dry run) send it, print the formatted
//! response and record its exports.
//!
//! Errors are split by [`RunError::is_fatal`]: a bad template or a failed
//! request only fails that file, while invalid replacement values and state
//! that cannot be written stop the whole run.

use crate::cli::Cli;
use crate::config::{self, ConfigError, Settings};
use crate::curl::{generate_curl_command, CurlOptions};
use crate::executor::{ExecutionConfig, HttpClient, NativeClient, RequestError};
use crate::export::collect_exports;
use crate::formatter::{format_response, Format};
use crate::fs::{atomic_write_file, StoreError};
use crate::models::{HeaderMap, HttpRequest, Template, TemplateError};
use crate::session::{Session, StatePaths};
use crate::varfile::{merge_file, write_var, VarMap};
use crate::variables::{EnvSource, NonInteractive, ProcessEnv, Prompter, StdinPrompter, VarError};
use log::{debug, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while processing template files.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Resolve(#[from] VarError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl RunError {
    /// Whether the error ends the whole run rather than just the current file.
    pub fn is_fatal(&self) -> bool {
        match self {
            RunError::Template(_) | RunError::Request(_) => false,
            RunError::Resolve(_)
            | RunError::Store(_)
            | RunError::Config(_)
            | RunError::Output(_) => true,
        }
    }
}

/// Settings for one run, shared by every file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// `--replace` values by replacement name.
    pub explicit: VarMap,
    pub format: Format,
    pub dry_run: bool,
    pub print_curl: bool,
    pub print_exports: bool,
    pub output_files: Vec<PathBuf>,
    pub export_files: Vec<PathBuf>,
    pub strict_required: bool,
    pub curl: CurlOptions,
    /// Headers added to every request that does not set them itself.
    pub default_headers: HeaderMap,
}

impl RunOptions {
    pub fn new(cli: &Cli, settings: &Settings) -> Self {
        Self {
            explicit: cli.replacements.iter().cloned().collect(),
            format: cli.format,
            dry_run: cli.dry_run,
            print_curl: cli.print_curl,
            print_exports: cli.print_exports,
            output_files: cli.output_files.clone(),
            export_files: cli.exports_files.clone(),
            strict_required: cli.strict || settings.strict_required,
            curl: CurlOptions {
                follow_redirects: follow_redirects(cli, settings),
                insecure: !settings.validate_ssl,
            },
            default_headers: settings.header_map(),
        }
    }
}

fn follow_redirects(cli: &Cli, settings: &Settings) -> bool {
    settings.follow_redirects && !cli.ignore_redirects
}

/// A file that failed without ending the run.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: RunError,
}

/// Outcome of a run over several files.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Processes templates against one session.
///
/// Formatted responses, curl lines and printed exports go to `out`.
pub struct Runner<'a, W> {
    session: &'a mut Session,
    process_env: &'a dyn EnvSource,
    prompter: &'a mut dyn Prompter,
    client: &'a dyn HttpClient,
    options: &'a RunOptions,
    out: W,
}

impl<'a, W: Write> Runner<'a, W> {
    pub fn new(
        session: &'a mut Session,
        process_env: &'a dyn EnvSource,
        prompter: &'a mut dyn Prompter,
        client: &'a dyn HttpClient,
        options: &'a RunOptions,
        out: W,
    ) -> Self {
        Self {
            session,
            process_env,
            prompter,
            client,
            options,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs every file in order.
    ///
    /// Non-fatal failures are collected in the summary and the next file is
    /// processed; a fatal error is returned immediately.
    pub fn run_all(&mut self, paths: &[PathBuf]) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();
        for path in paths {
            match self.run_file(path) {
                Ok(_) => summary.succeeded += 1,
                Err(e) if e.is_fatal() => return Err(e),
                Err(error) => {
                    warn!("{}: {}", path.display(), error);
                    summary.failures.push(FileFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }
        Ok(summary)
    }

    /// Loads and runs one template file.
    pub fn run_file(&mut self, path: &Path) -> Result<Vec<(String, String)>, RunError> {
        debug!("Loading template {}", path.display());
        let template = Template::load(path)?;
        self.run_template(&template)
    }

    /// Runs one template and returns the exports it produced.
    pub fn run_template(&mut self, template: &Template) -> Result<Vec<(String, String)>, RunError> {
        let resolved = self.session.resolve(
            template,
            &self.options.explicit,
            self.process_env,
            &mut *self.prompter,
            self.options.strict_required,
        )?;

        let request = HttpRequest::from_template(&resolved, &self.options.default_headers)
            .map_err(RequestError::from)?;

        if self.options.print_curl {
            writeln!(
                self.out,
                "{}",
                generate_curl_command(&request, &self.options.curl)
            )?;
        }

        if self.options.dry_run {
            debug!("Dry run, not sending {} {}", request.method, request.url);
            return Ok(Vec::new());
        }

        let response = self.client.send(&request)?;
        if !response.is_success() {
            warn!(
                "{} {} returned {} {}",
                request.method, request.url, response.status_code, response.status_text
            );
        }

        let output = format_response(&request, &response, self.options.format);
        for path in &self.options.output_files {
            atomic_write_file(path, &format!("{}\n", output))?;
        }
        writeln!(self.out, "{}", output)?;

        let exports = collect_exports(&resolved, &response.text(), &self.session.env_prefix());
        if exports.is_empty() {
            return Ok(exports);
        }

        self.session.record_exports(&exports);
        for path in &self.options.export_files {
            debug!("Merging {} exports into {}", exports.len(), path.display());
            merge_file(path, exports.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        }
        if self.options.print_exports {
            for (key, value) in &exports {
                writeln!(self.out, "{}", write_var(key, value))?;
            }
        }

        Ok(exports)
    }
}

/// Runs the command line: loads settings, opens the session, processes
/// every file and saves state.
///
/// State is saved even when a fatal error stops the run early.
pub fn dispatch(cli: Cli) -> Result<RunSummary, RunError> {
    let config_path = config::config_path();
    let settings = config::load_config(&config_path)?;
    let state_dir =
        config::state_dir(&settings).ok_or_else(|| ConfigError::NoStateDir(config_path.clone()))?;

    let options = RunOptions::new(&cli, &settings);
    let execution = ExecutionConfig::from_settings(&settings)
        .with_follow_redirects(follow_redirects(&cli, &settings));
    let client = NativeClient::new(&execution)?;

    let mut session = Session::open(
        StatePaths::in_dir(&state_dir),
        config::namespace_from_env(),
        &cli.imports,
    );
    debug!(
        "Session namespace '{}', state in {}",
        session.namespace(),
        state_dir.display()
    );

    let mut prompter: Box<dyn Prompter> = if cli.no_prompt {
        Box::new(NonInteractive)
    } else {
        Box::new(StdinPrompter::stdio())
    };

    let summary = {
        let stdout = io::stdout();
        let mut runner = Runner::new(
            &mut session,
            &ProcessEnv,
            prompter.as_mut(),
            &client,
            &options,
            stdout.lock(),
        );
        runner.run_all(&cli.files)?
    };

    session.close()?;
    Ok(summary)
}
