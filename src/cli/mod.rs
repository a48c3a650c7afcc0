//! CLI argument parsing for fsexec.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// fsexec: load and write files, find executables, and run shell commands.
///
/// Command lines are interpreted by the platform shell (`sh -c` or
/// `cmd /C`). Do not pass untrusted input.
#[derive(Parser, Debug)]
#[command(name = "fsexec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Append an NDJSON audit event for each operation to this file.
    #[arg(long, global = true, env = "FSEXEC_EVENTS", value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Shell used to run command lines, e.g. "bash -c".
    #[arg(long, global = true, env = "FSEXEC_SHELL", value_name = "SHELL")]
    pub shell: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for fsexec.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a file's raw bytes to stdout.
    Cat(CatArgs),

    /// Write stdin to a file, replacing its contents.
    ///
    /// The parent directory must exist unless --atomic is given.
    Write(WriteArgs),

    /// Locate an executable on the search path.
    ///
    /// Exits with code 4 when nothing matches.
    Which(WhichArgs),

    /// Run a command line and print its captured stdout.
    ///
    /// Exits with the command's exit code.
    Exec(ExecArgs),

    /// Run a command line on a worker thread, streaming stdout as it arrives.
    Stream(StreamArgs),
}

/// Output format for reports.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the `cat` command.
#[derive(Parser, Debug)]
pub struct CatArgs {
    /// File to load.
    pub path: PathBuf,
}

/// Arguments for the `write` command.
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// File to write.
    pub path: PathBuf,

    /// Write through a temp file and rename, creating parent directories.
    #[arg(long)]
    pub atomic: bool,
}

/// Arguments for the `which` command.
#[derive(Parser, Debug)]
pub struct WhichArgs {
    /// Executable base name (".exe" is tried as a fallback).
    pub name: String,

    /// Search this delimiter-separated directory list instead of PATH.
    #[arg(long, value_name = "DIRS")]
    pub path: Option<OsString>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `exec` command.
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Output format; json and yaml include the exit code.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Command line. A single argument is used verbatim; several are quoted
    /// and joined.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `stream` command.
#[derive(Parser, Debug)]
pub struct StreamArgs {
    /// Command line. A single argument is used verbatim; several are quoted
    /// and joined.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Turn command words into one shell command line.
///
/// A single word is taken as a complete command line so pipes and
/// redirections pass through; multiple words are quoted individually.
pub fn command_line(words: &[String]) -> String {
    match words {
        [line] => line.clone(),
        _ => shell_words::join(words),
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_cat() {
        let cli = Cli::try_parse_from(["fsexec", "cat", "data.bin"]).unwrap();
        if let Command::Cat(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("data.bin"));
        } else {
            panic!("Expected Cat command");
        }
    }

    #[test]
    fn parse_write_atomic() {
        let cli = Cli::try_parse_from(["fsexec", "write", "out.txt", "--atomic"]).unwrap();
        if let Command::Write(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("out.txt"));
            assert!(args.atomic);
        } else {
            panic!("Expected Write command");
        }
    }

    #[test]
    fn parse_which_with_path_and_format() {
        let cli = Cli::try_parse_from([
            "fsexec", "which", "git", "--path", "/usr/bin", "--format", "json",
        ])
        .unwrap();
        if let Command::Which(args) = cli.command {
            assert_eq!(args.name, "git");
            assert_eq!(args.path, Some(OsString::from("/usr/bin")));
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("Expected Which command");
        }
    }

    #[test]
    fn parse_exec_keeps_hyphenated_words() {
        let cli = Cli::try_parse_from(["fsexec", "exec", "--", "ls", "-la", "/tmp"]).unwrap();
        if let Command::Exec(args) = cli.command {
            assert_eq!(args.format, OutputFormat::Text);
            assert_eq!(args.command, ["ls", "-la", "/tmp"]);
        } else {
            panic!("Expected Exec command");
        }
    }

    #[test]
    fn parse_exec_requires_command() {
        assert!(Cli::try_parse_from(["fsexec", "exec"]).is_err());
        assert!(Cli::try_parse_from(["fsexec", "stream"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fsexec", "stream", "--events", "ev.ndjson", "--shell", "bash -c", "-vv", "--",
            "echo", "hi",
        ])
        .unwrap();
        assert_eq!(cli.events, Some(PathBuf::from("ev.ndjson")));
        assert_eq!(cli.shell.as_deref(), Some("bash -c"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn command_line_single_word_is_verbatim() {
        let words = vec!["echo hi | tr a-z A-Z".to_string()];
        assert_eq!(command_line(&words), "echo hi | tr a-z A-Z");
    }

    #[test]
    fn command_line_multiple_words_are_quoted() {
        let words = vec!["echo".to_string(), "a b".to_string(), "$HOME".to_string()];
        assert_eq!(command_line(&words), "echo 'a b' '$HOME'");
    }
}
