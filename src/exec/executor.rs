//! Pipe-based command execution.

use super::CHUNK_SIZE;
use super::handle::ExecHandle;
use super::shell::Shell;
use crate::error::{FsExecError, Result};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdout, ExitStatus, Stdio};
use tracing::debug;

/// Captured stdout and exit status of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Everything the command wrote to stdout, decoded lossily as UTF-8.
    pub stdout: String,
    /// How the shell exited.
    pub status: ExitStatus,
}

impl CommandOutput {
    /// Exit code of the shell (None if killed by a signal).
    pub fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Check if the command exited with status zero.
    pub fn is_success(&self) -> bool {
        self.status.success()
    }
}

impl Serialize for CommandOutput {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CommandOutput", 3)?;
        state.serialize_field("stdout", &self.stdout)?;
        state.serialize_field("exit_code", &self.exit_code())?;
        state.serialize_field("success", &self.is_success())?;
        state.end()
    }
}

/// Runs command lines through a configured [`Shell`].
#[derive(Debug, Clone, Default)]
pub struct Executor {
    shell: Shell,
}

impl Executor {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Run `command_line` and return its stdout text.
    ///
    /// Blocks until the child closes stdout and has been reaped. The exit
    /// status is discarded.
    pub fn execute_sync(&self, command_line: &str) -> Result<String> {
        self.execute_with_status(command_line)
            .map(|output| output.stdout)
    }

    /// Run `command_line` and return its stdout text and exit status.
    pub fn execute_with_status(&self, command_line: &str) -> Result<CommandOutput> {
        let (mut child, stdout) = self.spawn(command_line)?;

        // Decode once at the end so multi-byte characters split across
        // chunks stay intact.
        let mut captured = Vec::new();
        if let Err(e) = drain(command_line, stdout, |chunk| {
            captured.extend_from_slice(chunk);
            Ok(())
        }) {
            abandon(&mut child);
            return Err(e);
        }

        let status = reap(command_line, &mut child)?;
        debug!(command = command_line, bytes = captured.len(), ?status, "command finished");

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&captured).into_owned(),
            status,
        })
    }

    /// Run `command_line` on a new worker thread, writing each stdout chunk
    /// to `sink` and flushing it as it arrives.
    ///
    /// The sink moves into the worker and comes back from
    /// [`ExecHandle::join`]. Spawn, pipe and sink failures are reported by
    /// `join`, not here.
    ///
    /// # Errors
    ///
    /// * `SpawnFailed` - the worker thread itself could not be created
    pub fn execute_async<W>(&self, command_line: &str, sink: W) -> Result<ExecHandle<W>>
    where
        W: Write + Send + 'static,
    {
        let executor = self.clone();
        ExecHandle::spawn(command_line, move |command_line| {
            executor.stream(command_line, sink)
        })
    }

    fn stream<W: Write>(&self, command_line: &str, mut sink: W) -> Result<W> {
        let (mut child, stdout) = self.spawn(command_line)?;

        let sink_failed = |source| FsExecError::SinkFailed {
            command: command_line.to_string(),
            source,
        };
        if let Err(e) = drain(command_line, stdout, |chunk| {
            sink.write_all(chunk).map_err(sink_failed)?;
            sink.flush().map_err(sink_failed)
        }) {
            abandon(&mut child);
            return Err(e);
        }

        let status = reap(command_line, &mut child)?;
        debug!(command = command_line, ?status, "streamed command finished");
        Ok(sink)
    }

    fn spawn(&self, command_line: &str) -> Result<(Child, ChildStdout)> {
        let spawn_failed = |source| FsExecError::SpawnFailed {
            command: command_line.to_string(),
            source,
        };

        debug!(
            command = command_line,
            shell = ?self.shell.program(),
            "spawning command"
        );

        let mut child = self
            .shell
            .command(command_line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(spawn_failed)?;

        match child.stdout.take() {
            Some(stdout) => Ok((child, stdout)),
            None => {
                abandon(&mut child);
                Err(spawn_failed(io::Error::other("stdout pipe was not created")))
            }
        }
    }
}

/// Read `stdout` in [`CHUNK_SIZE`] chunks until end-of-stream, handing each
/// chunk to `on_chunk`. The pipe is closed on return.
fn drain<F>(command_line: &str, mut stdout: ChildStdout, mut on_chunk: F) -> Result<()>
where
    F: FnMut(&[u8]) -> Result<()>,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        match stdout.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => on_chunk(&chunk[..n])?,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(FsExecError::OutputFailed {
                    command: command_line.to_string(),
                    source,
                });
            }
        }
    }
}

fn reap(command_line: &str, child: &mut Child) -> Result<ExitStatus> {
    child.wait().map_err(|source| FsExecError::OutputFailed {
        command: command_line.to_string(),
        source,
    })
}

/// Kill a child whose output is no longer being read and wait for it, so a
/// blocked writer does not linger as a zombie.
fn abandon(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
