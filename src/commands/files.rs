//! `cat` and `write` commands.

use super::{CommandContext, output_failed};
use crate::cli::{CatArgs, WriteArgs};
use crate::error::{FsExecError, Result};
use crate::events::EventAction;
use crate::exit_codes;
use crate::fs::{atomic_write, load_file, write_file};
use serde_json::json;
use std::io::{Read, Write};

pub fn cmd_cat(ctx: &CommandContext, args: CatArgs, out: &mut impl Write) -> Result<i32> {
    let content = load_file(&args.path)?;

    out.write_all(&content).map_err(output_failed)?;
    out.flush().map_err(output_failed)?;

    ctx.record(
        EventAction::Load,
        json!({"path": args.path.display().to_string(), "bytes": content.len()}),
    )?;
    Ok(exit_codes::SUCCESS)
}

pub fn cmd_write(ctx: &CommandContext, args: WriteArgs, input: &mut impl Read) -> Result<i32> {
    let mut content = Vec::new();
    input
        .read_to_end(&mut content)
        .map_err(|e| FsExecError::UserError(format!("failed to read stdin: {}", e)))?;

    if args.atomic {
        atomic_write(&args.path, &content)?;
    } else {
        write_file(&args.path, &content)?;
    }

    ctx.record(
        EventAction::Write,
        json!({
            "path": args.path.display().to_string(),
            "bytes": content.len(),
            "atomic": args.atomic,
        }),
    )?;
    Ok(exit_codes::SUCCESS)
}
