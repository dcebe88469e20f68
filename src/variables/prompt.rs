//! Operator prompts for replacement values.
//!
//! Resolution asks a [`Prompter`] when neither explicit input nor the
//! environment supplied a value. The terminal implementation reads one line
//! per question; [`NonInteractive`] never answers, which makes resolution
//! fall back to defaults or leave placeholders in place.

use std::io::{self, BufRead, Write};

/// Asks the operator for a replacement value.
pub trait Prompter {
    /// Returns the operator's answer, or `None` when no answer is available
    /// (prompting disabled, end of input). An empty answer is returned as
    /// `Some("")`.
    fn prompt(&mut self, name: &str, suggestion: Option<&str>) -> io::Result<Option<String>>;
}

/// Prompter used with `--no-prompt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn prompt(&mut self, _name: &str, _suggestion: Option<&str>) -> io::Result<Option<String>> {
        Ok(None)
    }
}

/// Line-based prompter over any reader/writer pair.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Terminal prompter. Questions go to stderr so stdout only carries output.
pub type StdinPrompter = LinePrompter<io::StdinLock<'static>, io::Stderr>;

impl StdinPrompter {
    pub fn stdio() -> Self {
        LinePrompter::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, name: &str, suggestion: Option<&str>) -> io::Result<Option<String>> {
        match suggestion {
            Some(suggestion) => write!(self.output, "Enter a value for {} ({}): ", name, suggestion)?,
            None => write!(self.output, "Enter a value for {}: ", name)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
