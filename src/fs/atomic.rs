//! Atomic file replacement.
//!
//! State files are rewritten whole: the new content goes to a temporary file in
//! the same directory, is synced to disk, and is then renamed over the target.
//! An interrupted run leaves either the old file or the new one, never a mix.
//! A crash between write and rename may leave a `.{filename}.tmp` behind,
//! which the next successful write replaces.

use super::StoreError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically replaces `path` with `content`, creating parent directories.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<(), StoreError> {
    let path = path.as_ref();
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let temp_path = temp_path_for(path)?;
    if let Err(source) = write_and_sync(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(source));
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(source));
    }

    sync_parent_dir(path);
    Ok(())
}

/// Convenience wrapper around [`atomic_write`] for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), StoreError> {
    atomic_write(path, content.as_bytes())
}

/// Reads a text file, treating a missing file as `None`.
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<String>, StoreError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn temp_path_for(target: &Path) -> Result<PathBuf, StoreError> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::InvalidPath(target.to_path_buf()))?;
    let parent = target.parent().unwrap_or(Path::new(""));
    Ok(parent.join(format!(".{}.tmp", filename)))
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}

fn write_and_sync(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}
