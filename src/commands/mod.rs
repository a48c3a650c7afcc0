//! Command implementations for fsexec.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Handlers write to an injected output so they can be
//! tested without capturing the process's stdout.

mod files;
mod report;
mod run;
mod which;

use crate::cli::{Cli, Command};
use crate::error::{FsExecError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::exec::{Executor, Shell};
use serde_json::Value;
use std::io;
use std::path::PathBuf;

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Where to append audit events, if anywhere.
    pub events: Option<PathBuf>,
    /// Executor configured with the selected shell.
    pub executor: Executor,
}

impl CommandContext {
    /// Build the context from global CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let shell = match &cli.shell {
            Some(value) => Shell::parse(value)?,
            None => Shell::default(),
        };

        Ok(Self {
            events: cli.events.clone(),
            executor: Executor::new(shell),
        })
    }

    /// Append an audit event if an events file is configured.
    pub fn record(&self, action: EventAction, details: Value) -> Result<()> {
        match &self.events {
            Some(path) => append_event(path, &Event::new(action).with_details(details)),
            None => Ok(()),
        }
    }
}

/// Dispatch a command to its implementation.
///
/// Returns the process exit code on success.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let ctx = CommandContext::from_cli(&cli)?;

    match cli.command {
        Command::Cat(args) => files::cmd_cat(&ctx, args, &mut io::stdout().lock()),
        Command::Write(args) => files::cmd_write(&ctx, args, &mut io::stdin().lock()),
        Command::Which(args) => which::cmd_which(&ctx, args, &mut io::stdout().lock()),
        Command::Exec(args) => run::cmd_exec(&ctx, args, &mut io::stdout().lock()),
        Command::Stream(args) => run::cmd_stream(&ctx, args, io::stdout()).map(|(code, _)| code),
    }
}

/// Map a failed write to the command's output.
fn output_failed(e: io::Error) -> FsExecError {
    FsExecError::UserError(format!("failed to write output: {}", e))
}
