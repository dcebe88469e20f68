//! Replacement resolution.
//!
//! Each declared replacement is resolved in a fixed order, stopping at the
//! first source that yields a value:
//!
//! 1. explicit input (`--replace NAME=VALUE`),
//! 2. the environment, under `<namespace>_NAME`,
//! 3. the configured default, else the last value entered in this namespace,
//!    offered as a suggestion at the prompt,
//! 4. a bare prompt, for required replacements only.
//!
//! A replacement with no value leaves its placeholder in the template. The
//! raw value is then parsed as the declared type and substituted.

use super::environment::{env_prefix, EnvSource};
use super::prompt::Prompter;
use super::substitution::Substitute;
use super::VarError;
use crate::history::InputHistory;
use crate::models::{Replacement, ResolvedValue, Template};
use crate::varfile::VarMap;
use log::debug;

/// Resolves the replacements of a template against the run's sources.
pub struct Resolver<'a> {
    explicit: &'a VarMap,
    env: &'a dyn EnvSource,
    namespace: &'a str,
    history: &'a mut InputHistory,
    prompter: &'a mut dyn Prompter,
    strict_required: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(
        explicit: &'a VarMap,
        env: &'a dyn EnvSource,
        namespace: &'a str,
        history: &'a mut InputHistory,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        Self {
            explicit,
            env,
            namespace,
            history,
            prompter,
            strict_required: false,
        }
    }

    /// Makes an unresolved required replacement an error instead of leaving
    /// its placeholder in place.
    pub fn strict_required(mut self, strict: bool) -> Self {
        self.strict_required = strict;
        self
    }

    /// Finds the raw input for one replacement, or `None` if no source has it.
    ///
    /// Answers typed at the prompt are recorded in the history. An empty
    /// answer to a suggestion accepts the suggestion.
    pub fn resolve_raw(&mut self, replacement: &Replacement) -> Result<Option<String>, VarError> {
        let name = replacement.name.as_str();

        if let Some(value) = self.explicit.get(name) {
            debug!("{} resolved from explicit input", name);
            return Ok(Some(value.to_string()));
        }

        let env_name = format!("{}{}", env_prefix(self.namespace), name);
        if let Some(value) = self.env.lookup(&env_name) {
            debug!("{} resolved from environment variable {}", name, env_name);
            return Ok(Some(value));
        }

        let suggestion = match replacement.default_text() {
            Some(default) => Some(default),
            None => self
                .history
                .lookup(self.namespace, name)
                .filter(|last| !last.is_empty())
                .map(str::to_string),
        };

        match suggestion {
            Some(suggestion) if suggestion.is_empty() => {
                debug!("{} resolved to its empty default", name);
                Ok(Some(suggestion))
            }
            Some(suggestion) => match self.ask(name, Some(&suggestion))? {
                Some(answer) if !answer.is_empty() => {
                    self.history.set(self.namespace, name, answer.as_str());
                    Ok(Some(answer))
                }
                _ => {
                    debug!("{} resolved to suggestion '{}'", name, suggestion);
                    Ok(Some(suggestion))
                }
            },
            None if replacement.required => {
                let answer = self.ask(name, None)?;
                if let Some(answer) = answer.as_deref().filter(|a| !a.is_empty()) {
                    self.history.set(self.namespace, name, answer);
                }
                Ok(answer)
            }
            None => Ok(None),
        }
    }

    fn ask(&mut self, name: &str, suggestion: Option<&str>) -> Result<Option<String>, VarError> {
        self.prompter
            .prompt(name, suggestion)
            .map_err(|source| VarError::Prompt {
                name: name.to_string(),
                source,
            })
    }

    /// Resolves and type-checks one replacement.
    pub fn resolve_value(
        &mut self,
        replacement: &Replacement,
    ) -> Result<Option<ResolvedValue>, VarError> {
        let Some(raw) = self.resolve_raw(replacement)? else {
            if replacement.required && self.strict_required {
                return Err(VarError::MissingRequired(replacement.name.clone()));
            }
            debug!("{} left unresolved", replacement.name);
            return Ok(None);
        };

        replacement
            .parse_value(&raw)
            .map(Some)
            .map_err(|source| VarError::InvalidValue {
                name: replacement.name.clone(),
                source,
            })
    }

    /// Folds every declared replacement into the template, in declaration
    /// order, returning the resolved copy.
    pub fn resolve(&mut self, template: &Template) -> Result<Template, VarError> {
        let mut resolved = template.clone();
        for (placeholder, replacement) in &template.replacements {
            if let Some(value) = self.resolve_value(replacement)? {
                resolved = resolved.substitute(placeholder, &value);
            }
        }
        Ok(resolved)
    }
}
