use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::warn;

/// Polled modification-time tracker for shader source files.
///
/// `poll` compares the filesystem against cached times once per call; there
/// is no watcher thread and no debounce. A file touched twice between polls
/// is reported once.
pub struct FileTimestamps {
    times: HashMap<PathBuf, SystemTime>,
}

impl FileTimestamps {
    pub fn new() -> Self {
        Self {
            times: HashMap::new(),
        }
    }

    /// Start tracking a file at its current modification time.
    pub fn track(&mut self, path: &Path) {
        match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(mtime) => {
                self.times.insert(path.to_path_buf(), mtime);
            }
            Err(e) => warn!("Cannot read mtime of {}: {e}", path.display()),
        }
    }

    pub fn untrack(&mut self, path: &Path) {
        self.times.remove(path);
    }

    pub fn is_tracking(&self, path: &Path) -> bool {
        self.times.contains_key(path)
    }

    /// Paths whose modification time changed since the last poll. Any
    /// difference counts, not just a newer time: restoring an older file
    /// version (`cp -p`, archive extraction) moves the mtime backwards
    /// and still reloads. The cached time is refreshed for every
    /// reported path, so a change is reported exactly once even if the
    /// caller fails to act on it. Unreadable files (deleted, mid-save)
    /// are skipped until they reappear.
    pub fn poll(&mut self) -> Vec<PathBuf> {
        let mut changed = Vec::new();
        for (path, cached) in &mut self.times {
            if let Ok(mtime) = std::fs::metadata(path).and_then(|m| m.modified()) {
                if mtime != *cached {
                    *cached = mtime;
                    changed.push(path.clone());
                }
            }
        }
        changed
    }
}
