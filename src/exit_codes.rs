//! Exit code constants for the fsexec CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, PATH unset)
//! - 2: Filesystem failure (missing file, open/read/write errors)
//! - 3: Process failure (spawn, pipe, sink or worker errors)
//! - 4: Lookup miss (`which` found nothing)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or missing environment.
pub const USER_ERROR: i32 = 1;

/// Filesystem failure: file missing, unopenable, unreadable or unwritable.
pub const FILESYSTEM_FAILURE: i32 = 2;

/// Process failure: shell could not be spawned or its output not collected.
pub const PROCESS_FAILURE: i32 = 3;

/// No executable with the requested name was found on the search path.
pub const NOT_FOUND: i32 = 4;
