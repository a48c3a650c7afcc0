//! Tracing subscriber setup for the fsexec binary.
//!
//! Logs go to stderr so command output on stdout stays clean.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives; overrides the verbosity flags
//! - `FSEXEC_LOG_FORMAT`: `json` for structured output, anything else for
//!   human-readable lines

use crate::error::{FsExecError, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_VAR: &str = "FSEXEC_LOG_FORMAT";

/// Default filter directive for a verbosity level (`-v` count).
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "fsexec=warn",
        1 => "fsexec=info",
        2 => "fsexec=debug",
        _ => "fsexec=trace",
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// * `UserError` - `RUST_LOG` is malformed or a subscriber is already set
pub fn init_logging(verbosity: u8) -> Result<()> {
    let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).map_err(|e| {
            FsExecError::UserError(format!("invalid {}: {}", EnvFilter::DEFAULT_ENV, e))
        })?,
        Err(_) => EnvFilter::new(default_directive(verbosity)),
    };

    let json = std::env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json");
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|e| FsExecError::UserError(format!("failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "fsexec=warn");
        assert_eq!(default_directive(1), "fsexec=info");
        assert_eq!(default_directive(2), "fsexec=debug");
        assert_eq!(default_directive(9), "fsexec=trace");
    }

    #[test]
    fn default_directives_parse() {
        for verbosity in 0..4 {
            assert!(EnvFilter::try_new(default_directive(verbosity)).is_ok());
        }
    }
}
