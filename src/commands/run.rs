//! `exec` and `stream` commands.

use super::report::render;
use super::{CommandContext, output_failed};
use crate::cli::{ExecArgs, OutputFormat, StreamArgs, command_line};
use crate::error::Result;
use crate::events::EventAction;
use crate::exec::CommandOutput;
use crate::exit_codes;
use serde::Serialize;
use serde_json::json;
use std::io::Write;

#[derive(Serialize)]
struct ExecReport<'a> {
    command: &'a str,
    #[serde(flatten)]
    output: &'a CommandOutput,
}

/// Exit code to report for a finished command.
fn child_exit_code(output: &CommandOutput) -> i32 {
    exit_code_for(output.exit_code())
}

/// Map a child's raw exit code onto a process exit code.
///
/// Signal deaths have no code, and Windows reports crashes as NTSTATUS values
/// (negative as `i32`); neither fits in an exit byte, so both become
/// `PROCESS_FAILURE`.
fn exit_code_for(code: Option<i32>) -> i32 {
    match code {
        Some(code) if (0..=255).contains(&code) => code,
        _ => exit_codes::PROCESS_FAILURE,
    }
}

pub fn cmd_exec(ctx: &CommandContext, args: ExecArgs, out: &mut impl Write) -> Result<i32> {
    let command = command_line(&args.command);
    let output = ctx.executor.execute_with_status(&command)?;

    let rendered = match args.format {
        OutputFormat::Text => output.stdout.clone(),
        format => render(
            &ExecReport {
                command: &command,
                output: &output,
            },
            format,
        )?,
    };
    out.write_all(rendered.as_bytes())
        .and_then(|()| out.flush())
        .map_err(output_failed)?;

    ctx.record(
        EventAction::Exec,
        json!({"command": command, "exit_code": output.exit_code()}),
    )?;
    Ok(child_exit_code(&output))
}

/// Stream the command's stdout into `sink` from a worker thread, then join it.
///
/// Returns the exit code and the sink.
pub fn cmd_stream<W>(ctx: &CommandContext, args: StreamArgs, sink: W) -> Result<(i32, W)>
where
    W: Write + Send + 'static,
{
    let command = command_line(&args.command);
    let handle = ctx.executor.execute_async(&command, sink)?;
    let sink = handle.join()?;

    ctx.record(EventAction::Stream, json!({"command": command}))?;
    Ok((exit_codes::SUCCESS, sink))
}
