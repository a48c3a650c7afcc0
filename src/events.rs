//! Audit event log for the fsexec CLI.
//!
//! When an events file is configured, each CLI operation appends one event
//! in NDJSON format (one JSON object per line).
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: The operation performed (load, write, which, exec, stream)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `details`: Freeform object with operation-specific details
//!
//! ```no_run
//! use fsexec::events::{Event, EventAction, append_event};
//! use serde_json::json;
//!
//! let event = Event::new(EventAction::Which).with_details(json!({"name": "git"}));
//! append_event("fsexec-events.ndjson", &event)?;
//! # Ok::<(), fsexec::error::FsExecError>(())
//! ```

use crate::error::{FsExecError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Operations that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// File loaded and printed
    Load,
    /// File written from stdin
    Write,
    /// Executable looked up on the search path
    Which,
    /// Command run synchronously
    Exec,
    /// Command streamed from a worker
    Stream,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Load => write!(f, "load"),
            EventAction::Write => write!(f, "write"),
            EventAction::Which => write!(f, "which"),
            EventAction::Exec => write!(f, "exec"),
            EventAction::Stream => write!(f, "stream"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The operation that was performed.
    pub action: EventAction,

    /// The actor who performed the operation (e.g., `user@HOST`).
    pub actor: String,

    /// Freeform details object with operation-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            FsExecError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the events file at `path`.
///
/// The file and its parent directories are created if missing. Each append
/// writes one line with a trailing newline and syncs it to disk.
///
/// # Errors
///
/// * `UserError` - the event could not be serialized
/// * `WriteFailed` - the events file could not be created, written or synced
pub fn append_event<P: AsRef<Path>>(path: P, event: &Event) -> Result<()> {
    let path = path.as_ref();
    let json_line = event.to_ndjson_line()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| FsExecError::WriteFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_failed = |source| FsExecError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_failed)?;

    writeln!(file, "{}", json_line).map_err(write_failed)?;
    file.sync_all().map_err(write_failed)?;

    Ok(())
}

/// Read every event from the events file at `path`, skipping blank lines.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let content = crate::fs::load_file(path)?;
    let content = String::from_utf8_lossy(&content);

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                FsExecError::UserError(format!(
                    "invalid event on line {} of '{}': {}",
                    i + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
