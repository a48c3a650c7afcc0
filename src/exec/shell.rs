//! Shell selection for command execution.

use crate::error::{FsExecError, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

/// The program and flag used to interpret a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: OsString,
    flag: String,
}

impl Shell {
    /// Create a shell from a program and the flag that precedes the command
    /// line (for example `bash` and `-c`).
    pub fn new(program: impl Into<OsString>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    /// The platform shell: `sh -c` on POSIX, `cmd /C` on Windows.
    pub fn system() -> Self {
        #[cfg(windows)]
        {
            Self::new("cmd", "/C")
        }
        #[cfg(not(windows))]
        {
            Self::new("sh", "-c")
        }
    }

    /// Parse a shell description such as `"bash -c"` or `"pwsh -Command"`.
    ///
    /// A bare program gets `/C` if it is `cmd`, `-c` otherwise.
    ///
    /// # Errors
    ///
    /// * `UserError` - the value is empty, badly quoted or has extra words
    pub fn parse(value: &str) -> Result<Self> {
        let words = shell_words::split(value).map_err(|e| {
            FsExecError::UserError(format!("invalid shell '{}': {}", value, e))
        })?;

        match words.as_slice() {
            [program] => {
                let flag = if is_cmd(program) { "/C" } else { "-c" };
                Ok(Self::new(program, flag))
            }
            [program, flag] => Ok(Self::new(program, flag)),
            [] => Err(FsExecError::UserError("shell must not be empty".to_string())),
            _ => Err(FsExecError::UserError(format!(
                "invalid shell '{}': expected a program and at most one flag",
                value
            ))),
        }
    }

    /// The shell program.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// The flag placed before the command line.
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Build the process that runs `command_line` through this shell.
    pub(crate) fn command(&self, command_line: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(&self.flag);

        // cmd.exe does its own parsing; MSVC-style quoting would corrupt it.
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.raw_arg(command_line);
        }
        #[cfg(not(windows))]
        command.arg(command_line);

        command
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::system()
    }
}

fn is_cmd(program: &str) -> bool {
    Path::new(program)
        .file_stem()
        .is_some_and(|stem| stem.eq_ignore_ascii_case("cmd"))
}
