//! Whole-file loading.

use crate::error::{FsExecError, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Load the entire content of a file into memory.
///
/// The file must exist; otherwise this fails with
/// [`FsExecError::FileNotFound`] without touching the file. The length is
/// taken once, by seeking to the end of the opened file, and at most that many
/// bytes are read. A file that shrinks during the read yields a shorter
/// buffer; this is not detected.
///
/// # Errors
///
/// * `FileNotFound` - nothing exists at `path`
/// * `CannotOpen` - the path exists but cannot be opened as a file
/// * `ReadFailed` - seeking or reading the opened file failed
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsExecError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = File::open(path).map_err(|source| FsExecError::CannotOpen {
        path: path.to_path_buf(),
        source,
    })?;

    // Directories open fine on POSIX but cannot be read as a byte stream.
    let metadata = file.metadata().map_err(|source| FsExecError::CannotOpen {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.is_dir() {
        return Err(FsExecError::CannotOpen {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::IsADirectory, "path is a directory"),
        });
    }

    let read_failed = |source| FsExecError::ReadFailed {
        path: path.to_path_buf(),
        source,
    };

    let len = file.seek(SeekFrom::End(0)).map_err(read_failed)?;
    file.seek(SeekFrom::Start(0)).map_err(read_failed)?;

    let mut buffer = Vec::with_capacity(len as usize);
    file.take(len).read_to_end(&mut buffer).map_err(read_failed)?;

    debug!(path = %path.display(), bytes = buffer.len(), "loaded file");
    Ok(buffer)
}
