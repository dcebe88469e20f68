//! Filesystem helpers shared by the history store, the export merge and
//! output files.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file, read_optional};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or persisting state files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written or moved into place.
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target path has no usable file name.
    #[error("invalid file path '{}'", .0.display())]
    InvalidPath(PathBuf),
}
