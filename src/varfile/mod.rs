//! Var-file format shared by the input history and exported state.
//!
//! See [`codec`] for the line grammar, [`map`] for the ordered map the stores
//! are built on, and [`merge`] for in-place export merging.

pub mod codec;
pub mod map;
pub mod merge;

pub use codec::{decode, decode_line, is_comment, read_var, write_var};
pub use map::VarMap;
pub use merge::{merge_entries, merge_file};

use thiserror::Error;

/// Errors from the single-entry reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarFileError {
    #[error("line is a comment")]
    Comment,

    #[error("no KEY=VALUE assignment found in '{0}'")]
    NoEntry(String),
}
