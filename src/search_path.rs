//! Executable lookup on the search path.
//!
//! [`SearchPath`] holds the ordered directory list explicitly so lookups can
//! run against a controlled list; [`find_executable_in_path`] is the
//! convenience form that reads `PATH` from the process environment.

use crate::error::{FsExecError, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use tracing::debug;

/// Name of the environment variable holding the search path.
pub const PATH_VAR: &str = "PATH";

/// Ordered list of directories searched for executables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Read the search path from the `PATH` environment variable.
    ///
    /// # Errors
    ///
    /// * `SearchPathUnset` - `PATH` is not set for this process
    pub fn from_env() -> Result<Self> {
        Self::from_var(env::var_os(PATH_VAR))
    }

    fn from_var(value: Option<OsString>) -> Result<Self> {
        value
            .map(Self::parse)
            .ok_or(FsExecError::SearchPathUnset)
    }

    /// Split a search-path value with the platform delimiter (`:` on POSIX,
    /// `;` on Windows).
    ///
    /// Empty segments are kept; they resolve relative to the current
    /// directory, as the shell does.
    pub fn parse<S: AsRef<OsStr>>(value: S) -> Self {
        Self {
            dirs: env::split_paths(value.as_ref()).collect(),
        }
    }

    /// Build a search path from an explicit directory list.
    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// The directories in search order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Every path probed for `name`, in probe order: for each directory the
    /// bare name, then the name with `.exe` appended.
    pub fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.dirs.iter().flat_map(move |dir| {
            [dir.join(name), dir.join(format!("{}.exe", name))]
        })
    }

    /// Find the first existing candidate for `name`.
    ///
    /// Only existence is checked; the match is not verified to be an
    /// executable file.
    pub fn find_executable(&self, name: &str) -> Option<PathBuf> {
        let found = self.candidates(name).find(|candidate| candidate.exists());
        debug!(name, found = ?found, dirs = self.dirs.len(), "searched for executable");
        found
    }
}

/// Find an executable by base name on the process's `PATH`.
///
/// Returns `Ok(None)` when no directory holds a match.
///
/// # Errors
///
/// * `SearchPathUnset` - `PATH` is not set
///
/// # Example
///
/// ```no_run
/// use fsexec::search_path::find_executable_in_path;
///
/// if let Some(git) = find_executable_in_path("git")? {
///     println!("git lives at {}", git.display());
/// }
/// # Ok::<(), fsexec::error::FsExecError>(())
/// ```
pub fn find_executable_in_path(name: &str) -> Result<Option<PathBuf>> {
    Ok(SearchPath::from_env()?.find_executable(name))
}

#[cfg(test)]
mod tests;
