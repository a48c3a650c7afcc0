//! Error types for fsexec.
//!
//! Uses thiserror for derive macros. Every public operation returns
//! [`Result`], so file loads, writes, lookups and command execution all share
//! one error discipline.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fsexec operations.
///
/// Each variant maps to a process exit code via [`FsExecError::exit_code`].
#[derive(Error, Debug)]
pub enum FsExecError {
    /// The file to load does not exist.
    #[error("file does not exist: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be opened for reading.
    #[error("could not open file '{}': {source}", .path.display())]
    CannotOpen { path: PathBuf, source: io::Error },

    /// The file was opened but seeking or reading it failed.
    #[error("failed to read file '{}': {source}", .path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// The file could not be created, written or replaced.
    #[error("failed to write file '{}': {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// The PATH environment variable is not set.
    #[error("PATH environment variable is not set")]
    SearchPathUnset,

    /// The shell could not be started for a command.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed { command: String, source: io::Error },

    /// Reading the child's output or waiting for it failed.
    #[error("failed to collect output of '{command}': {source}")]
    OutputFailed { command: String, source: io::Error },

    /// Writing streamed output to the caller's sink failed.
    #[error("failed to forward output of '{command}': {source}")]
    SinkFailed { command: String, source: io::Error },

    /// The background worker running a command panicked.
    #[error("worker running '{command}' panicked")]
    WorkerPanicked { command: String },

    /// Invalid arguments or unusable input at the CLI surface.
    #[error("{0}")]
    UserError(String),
}

impl FsExecError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FsExecError::FileNotFound { .. }
            | FsExecError::CannotOpen { .. }
            | FsExecError::ReadFailed { .. }
            | FsExecError::WriteFailed { .. } => exit_codes::FILESYSTEM_FAILURE,
            FsExecError::SpawnFailed { .. }
            | FsExecError::OutputFailed { .. }
            | FsExecError::SinkFailed { .. }
            | FsExecError::WorkerPanicked { .. } => exit_codes::PROCESS_FAILURE,
            FsExecError::SearchPathUnset | FsExecError::UserError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for fsexec operations.
pub type Result<T> = std::result::Result<T, FsExecError>;
