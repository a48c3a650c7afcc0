//! In-place whole-file writes.

use crate::error::{FsExecError, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Write a buffer to a file, creating it or truncating any existing content.
///
/// The write happens in place: a crash mid-write can leave a partial file.
/// Missing parent directories are not created, so writing below a directory
/// that does not exist fails. Use [`crate::fs::atomic_write`] when the
/// target must never be observed half-written.
///
/// # Errors
///
/// * `WriteFailed` - the file could not be created, written or flushed
pub fn write_file<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let write_failed = |source| FsExecError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_failed)?;
    file.write_all(data).map_err(write_failed)?;
    file.flush().map_err(write_failed)?;

    debug!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(())
}
