//! fsexec: filesystem and shell-command helpers from the command line.
//!
//! This is the main entry point for the `fsexec` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and maps
//! errors to exit codes.

use fsexec::cli::Cli;
use fsexec::{commands, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: {}", err);
    }

    match commands::dispatch(cli) {
        Ok(code) => {
            // Handlers only return byte-sized codes; anything else is a failure.
            ExitCode::from(u8::try_from(code).unwrap_or(exit_codes::PROCESS_FAILURE as u8))
        }
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

