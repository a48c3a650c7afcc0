//! Background worker handle for streaming execution.

use crate::error::{FsExecError, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Completion bookkeeping shared by the worker and its handle.
#[derive(Debug, Default)]
struct Completion {
    finished: bool,
    detached: bool,
}

/// Handle to a command running on its own worker thread.
///
/// [`join`](ExecHandle::join) waits for the command's stdout to close and
/// for the child to exit, then returns the sink or the failure that stopped
/// the worker.
///
/// Dropping the handle without joining detaches the worker: the command runs
/// to completion, its output still reaches the sink, and nobody waits for it.
/// A failure of a detached worker, including a panic, is logged at `warn`
/// level and otherwise lost. Because the worker is not waited for, a detached
/// command may be cut short if the process exits first.
#[derive(Debug)]
pub struct ExecHandle<W> {
    command: String,
    completion: Arc<Mutex<Completion>>,
    worker: Option<JoinHandle<Result<W>>>,
}

impl<W: Send + 'static> ExecHandle<W> {
    pub(crate) fn spawn<F>(command_line: &str, run: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Result<W> + Send + 'static,
    {
        let command = command_line.to_string();
        let completion = Arc::new(Mutex::new(Completion::default()));

        let worker_command = command.clone();
        let worker_completion = Arc::clone(&completion);
        let worker = thread::Builder::new()
            .name("fsexec-worker".to_string())
            .spawn(move || {
                match panic::catch_unwind(AssertUnwindSafe(|| run(&worker_command))) {
                    Ok(result) => {
                        report(&worker_command, &worker_completion, &result);
                        result
                    }
                    Err(payload) => {
                        let panicked: Result<()> = Err(FsExecError::WorkerPanicked {
                            command: worker_command.clone(),
                        });
                        report(&worker_command, &worker_completion, &panicked);
                        panic::resume_unwind(payload)
                    }
                }
            })
            .map_err(|source| FsExecError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        Ok(Self {
            command,
            completion,
            worker: Some(worker),
        })
    }
}

impl<W> ExecHandle<W> {
    /// The command line this handle is running.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Check if the worker has finished, without blocking.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the command to finish and return the sink.
    ///
    /// # Errors
    ///
    /// * `SpawnFailed` - the shell could not be started
    /// * `OutputFailed` - reading the pipe or reaping the child failed
    /// * `SinkFailed` - writing to the sink failed
    /// * `WorkerPanicked` - the worker thread panicked
    pub fn join(mut self) -> Result<W> {
        match self.worker.take() {
            Some(worker) => worker.join().unwrap_or_else(|_| {
                Err(FsExecError::WorkerPanicked {
                    command: self.command.clone(),
                })
            }),
            None => Err(FsExecError::WorkerPanicked {
                command: self.command.clone(),
            }),
        }
    }
}

impl<W> Drop for ExecHandle<W> {
    fn drop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        let mut completion = lock(&self.completion);
        if completion.finished {
            // The worker already reported to a live handle; collect its outcome here.
            drop(completion);
            match worker.join() {
                Ok(Err(e)) => {
                    warn!(command = %self.command, error = %e, "unjoined command failed")
                }
                Err(_) => warn!(command = %self.command, "unjoined command worker panicked"),
                Ok(Ok(_)) => {}
            }
        } else {
            completion.detached = true;
            debug!(command = %self.command, "detaching command worker");
        }
    }
}

/// Record the worker's outcome: mark it finished for a live handle, or log a
/// failure nobody will join.
fn report<W>(command: &str, completion: &Mutex<Completion>, result: &Result<W>) {
    let mut completion = lock(completion);
    if completion.detached {
        if let Err(e) = result {
            warn!(command, error = %e, "detached command failed");
        }
    } else {
        completion.finished = true;
    }
}

fn lock(completion: &Mutex<Completion>) -> MutexGuard<'_, Completion> {
    completion
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}
