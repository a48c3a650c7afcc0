use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) struct EnvGuard {
    name: &'static str,
    original: Option<OsString>,
}

impl EnvGuard {
    /// Remove `name` from the process environment until the guard drops.
    ///
    /// Callers must be `#[serial]` with every other test touching `name`.
    pub(crate) fn remove(name: &'static str) -> Self {
        let original = std::env::var_os(name);
        // SAFETY: tests that touch this variable are serialized, and child
        // processes spawned meanwhile fall back to the libc default path.
        unsafe { std::env::remove_var(name) };
        Self { name, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        if let Some(value) = &self.original {
            // SAFETY: see `EnvGuard::remove`.
            unsafe { std::env::set_var(self.name, value) };
        }
    }
}

/// Create `dir/name` with placeholder content, creating `dir` if needed.
pub(crate) fn touch(dir: &Path, name: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, b"#!/bin/sh\n").unwrap();
    path
}

/// A temp dir holding `count` empty `binN` directories, returned in order.
pub(crate) fn create_bin_dirs(count: usize) -> (TempDir, Vec<PathBuf>) {
    let temp_dir = TempDir::new().unwrap();
    let dirs = (0..count)
        .map(|i| {
            let dir = temp_dir.path().join(format!("bin{}", i));
            std::fs::create_dir_all(&dir).unwrap();
            dir
        })
        .collect();
    (temp_dir, dirs)
}
