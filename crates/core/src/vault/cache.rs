//! Modification-time validated content cache.
//!
//! Entries are keyed by absolute path and are only served while the file on
//! disk still carries the modification time recorded with the entry.
//!
//! # Locking
//! - `get` takes the shared lock to copy the entry out, releases it, stats the
//!   file with no lock held, then takes the shared lock again to confirm the
//!   entry it is about to return is the one it validated.
//! - Invalidation takes the exclusive lock and only removes the entry if it
//!   still has the modification time that was found stale. A concurrent `set`
//!   with fresher data is never removed by an older decision.
//! - `set` and `delete` hold the exclusive lock for the map mutation only.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

/// A cached note. Always handed out by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub content: String,
    pub tags: Vec<String>,
    pub modified: SystemTime,
}

#[derive(Debug, Default)]
pub struct ContentCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `path` if it is still fresh.
    ///
    /// A missing file, a failed stat or a changed modification time purges
    /// the entry and reports a miss.
    pub fn get(&self, path: &Path) -> Option<CacheEntry> {
        let recorded = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            entries.get(path)?.modified
        };

        let current = match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::debug!("cache purge {}: {}", path.display(), e);
                self.invalidate(path, recorded);
                return None;
            }
        };

        if current != recorded {
            tracing::debug!("cache purge {}: modification time changed", path.display());
            self.invalidate(path, recorded);
            return None;
        }

        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(path).filter(|e| e.modified == current).cloned()
    }

    /// Insert or replace the entry for `path`.
    pub fn set(&self, path: &Path, content: &str, tags: &[String], modified: SystemTime) {
        let entry = CacheEntry { content: content.to_owned(), tags: tags.to_vec(), modified };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(path.to_path_buf(), entry);
    }

    pub fn delete(&self, path: &Path) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove the entry only if it is still the one judged stale.
    fn invalidate(&self, path: &Path, stale: SystemTime) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(path).is_some_and(|e| e.modified == stale) {
            entries.remove(path);
        }
    }
}
