//! Shell command execution.
//!
//! Commands are full command lines handed verbatim to the platform shell
//! (`sh -c` on POSIX, `cmd /C` on Windows). The child's stdout is read
//! through a pipe in [`CHUNK_SIZE`] chunks; stdin and stderr are inherited
//! from this process and never captured.
//!
//! # Shell injection
//!
//! The command line is interpreted by the shell, including expansions,
//! redirections and command separators. Never build one from untrusted
//! input.
//!
//! # Entry points
//!
//! - [`execute_sync`] blocks and returns the captured stdout text.
//! - [`execute_with_status`] does the same and also returns the exit status.
//! - [`execute_async`] streams stdout into an owned sink on a worker thread
//!   and returns an [`ExecHandle`] to join.
//!
//! The free functions use [`Shell::default`]; [`Executor`] runs the same
//! operations with an explicit shell.

mod executor;
mod handle;
mod shell;
mod sink;

pub use executor::{CommandOutput, Executor};
pub use handle::ExecHandle;
pub use shell::Shell;
pub use sink::SharedBuffer;

use crate::error::Result;
use std::io::{self, Write};

/// Size of each read from the child's stdout pipe.
pub const CHUNK_SIZE: usize = 128;

/// Run a command line through the default shell and return its stdout.
///
/// Blocks until the child closes stdout and has exited. The exit status is
/// not reported; use [`execute_with_status`] when it matters.
///
/// # Errors
///
/// * `SpawnFailed` - the shell could not be started
/// * `OutputFailed` - reading the pipe or reaping the child failed
pub fn execute_sync(command_line: &str) -> Result<String> {
    Executor::default().execute_sync(command_line)
}

/// Run a command line through the default shell and return its stdout
/// together with the exit status.
pub fn execute_with_status(command_line: &str) -> Result<CommandOutput> {
    Executor::default().execute_with_status(command_line)
}

/// Run a command line on a worker thread, streaming stdout into `sink`.
///
/// See [`Executor::execute_async`].
pub fn execute_async<W>(command_line: &str, sink: W) -> Result<ExecHandle<W>>
where
    W: Write + Send + 'static,
{
    Executor::default().execute_async(command_line, sink)
}

/// Run a command line on a worker thread, streaming stdout to this
/// process's standard output.
pub fn execute_async_stdout(command_line: &str) -> Result<ExecHandle<io::Stdout>> {
    execute_async(command_line, io::stdout())
}
