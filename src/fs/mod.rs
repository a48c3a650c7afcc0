//! Filesystem helpers for fsexec.
//!
//! Whole-file loads and writes. Plain writes truncate in place; callers that
//! need crash safety use [`atomic_write`] instead.

pub mod atomic;
mod load;
mod write;

pub use atomic::atomic_write;
pub use load::load_file;
pub use write::write_file;
