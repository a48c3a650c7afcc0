//! `which` command.

use super::report::render;
use super::{CommandContext, output_failed};
use crate::cli::{OutputFormat, WhichArgs};
use crate::error::Result;
use crate::events::EventAction;
use crate::exit_codes;
use crate::search_path::SearchPath;
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct WhichReport<'a> {
    name: &'a str,
    path: Option<PathBuf>,
}

pub fn cmd_which(ctx: &CommandContext, args: WhichArgs, out: &mut impl Write) -> Result<i32> {
    let search_path = match &args.path {
        Some(dirs) => SearchPath::parse(dirs),
        None => SearchPath::from_env()?,
    };
    let found = search_path.find_executable(&args.name);

    match args.format {
        OutputFormat::Text => {
            if let Some(path) = &found {
                writeln!(out, "{}", path.display()).map_err(output_failed)?;
            }
        }
        format => {
            let report = WhichReport {
                name: &args.name,
                path: found.clone(),
            };
            out.write_all(render(&report, format)?.as_bytes())
                .map_err(output_failed)?;
        }
    }

    ctx.record(
        EventAction::Which,
        json!({
            "name": args.name,
            "path": found.as_ref().map(|path| path.display().to_string()),
        }),
    )?;

    Ok(if found.is_some() {
        exit_codes::SUCCESS
    } else {
        exit_codes::NOT_FOUND
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_bin_dirs, touch};
    use std::env;

    fn which_args(name: &str, dirs: &[PathBuf], format: OutputFormat) -> WhichArgs {
        WhichArgs {
            name: name.to_string(),
            path: Some(env::join_paths(dirs).unwrap()),
            format,
        }
    }

    #[test]
    fn which_prints_first_match() {
        let (_temp, dirs) = create_bin_dirs(2);
        let tool = touch(&dirs[1], "tool");

        let mut out = Vec::new();
        let args = which_args("tool", &dirs, OutputFormat::Text);
        let code = cmd_which(&CommandContext::default(), args, &mut out).unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", tool.display()));
    }

    #[test]
    fn which_miss_exits_not_found_silently() {
        let (_temp, dirs) = create_bin_dirs(2);

        let mut out = Vec::new();
        let args = which_args("doesnotexist12345", &dirs, OutputFormat::Text);
        let code = cmd_which(&CommandContext::default(), args, &mut out).unwrap();

        assert_eq!(code, exit_codes::NOT_FOUND);
        assert!(out.is_empty());
    }

    #[test]
    fn which_json_report_includes_null_path() {
        let (_temp, dirs) = create_bin_dirs(1);

        let mut out = Vec::new();
        let args = which_args("missing", &dirs, OutputFormat::Json);
        cmd_which(&CommandContext::default(), args, &mut out).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["name"], "missing");
        assert!(report["path"].is_null());
    }
}
