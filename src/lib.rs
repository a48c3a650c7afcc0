//! fsexec: small filesystem and shell-command helpers.
//!
//! - [`fs`]: load a whole file into memory, write a buffer to a file
//! - [`search_path`]: locate an executable on the search path
//! - [`exec`]: run a shell command line synchronously (captured output) or
//!   on a worker thread (streamed output)
//!
//! Every operation returns [`error::Result`].
//!
//! ```no_run
//! use fsexec::{exec, fs, search_path};
//!
//! fs::write_file("greeting.txt", b"hello")?;
//! assert_eq!(fs::load_file("greeting.txt")?, b"hello");
//!
//! if search_path::find_executable_in_path("git")?.is_some() {
//!     let version = exec::execute_sync("git --version")?;
//!     println!("{}", version.trim());
//! }
//!
//! let handle = exec::execute_async_stdout("echo streaming")?;
//! handle.join()?;
//! # Ok::<(), fsexec::error::FsExecError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod events;
pub mod exec;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod search_path;

#[cfg(test)]
mod test_support;
