//! Atomic file writes.
//!
//! [`crate::fs::write_file`] truncates in place, so a crash mid-write leaves a
//! partial file. [`atomic_write`] trades that for a temp-file-then-rename:
//!
//! 1. Write content to a uniquely named `.{filename}.XXXXXX.tmp` file in the
//!    target's directory
//! 2. Sync the temp file to disk (fsync)
//! 3. Persist it over the target, then sync the directory entry on Unix
//!
//! Each call gets its own temp file, so concurrent writers to one target never
//! share a staging file; the last rename wins. The same-directory temp file
//! keeps the rename on one filesystem. If a call fails, its temp file is
//! removed; only a crash can leave one behind.

use crate::error::{FsExecError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// Atomically write bytes to a file.
///
/// Unlike [`crate::fs::write_file`], missing parent directories are created.
///
/// # Errors
///
/// * `WriteFailed` - the path has no file name, or directory creation, temp
///   write, sync or rename failed
///
/// # Example
///
/// ```no_run
/// use fsexec::fs::atomic_write;
///
/// atomic_write("state/settings.json", b"{}")?;
/// # Ok::<(), fsexec::error::FsExecError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let write_failed = |source| FsExecError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path.file_name().ok_or_else(|| {
        write_failed(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|source| FsExecError::WriteFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut prefix = std::ffi::OsString::from(".");
    prefix.push(file_name);
    prefix.push(".");
    let staged = Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_failed)?;

    let staged = stage(staged, content).map_err(write_failed)?;
    staged.persist(path).map_err(|e| write_failed(e.error))?;
    sync_dir(parent);

    debug!(path = %path.display(), bytes = content.len(), "atomically wrote file");
    Ok(())
}

/// Write and fsync the staged content. Dropping `file` on error deletes it.
fn stage(mut file: NamedTempFile, content: &[u8]) -> io::Result<NamedTempFile> {
    file.write_all(content)?;
    file.as_file().sync_all()?;
    Ok(file)
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Ok(dir) = File::open(dir) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
