//! Replacement resolution and substitution.
//!
//! [`Resolver`] decides which value each declared replacement takes;
//! [`Substitute`] writes that value into every field of a template.

pub mod environment;
pub mod prompt;
pub mod resolve;
pub mod substitution;

pub use environment::{env_prefix, EnvSource, LayeredEnv, ProcessEnv};
pub use prompt::{LinePrompter, NonInteractive, Prompter, StdinPrompter};
pub use resolve::Resolver;
pub use substitution::{substitute_text, substitute_value, Substitute};

use crate::models::ValueParseError;
use thiserror::Error;

/// Errors that can occur while resolving replacements. All of them end the
/// run.
#[derive(Debug, Error)]
pub enum VarError {
    /// A value was supplied but does not parse as the declared type.
    #[error("Invalid value for {name}: {source}")]
    InvalidValue {
        name: String,
        #[source]
        source: ValueParseError,
    },

    /// A required replacement has no value and strict mode is on.
    #[error("No value provided for required replacement {0}")]
    MissingRequired(String),

    /// Reading the operator's answer failed.
    #[error("Failed to read a value for {name}: {source}")]
    Prompt {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
