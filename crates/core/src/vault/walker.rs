//! Directory walker for note discovery.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use super::guard::is_markdown;
use super::{Cancellation, VaultError};

/// A markdown file found during a walk.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file, used as the cache key.
    pub absolute_path: PathBuf,
    /// File modification time at discovery.
    pub modified: SystemTime,
}

/// Walker over the markdown files below a starting directory.
///
/// Unreadable directories and files are skipped rather than reported: one bad
/// entry should not hide the rest of the vault. Symlinks are not followed and
/// only regular files are yielded.
#[derive(Debug)]
pub struct VaultWalker {
    start: PathBuf,
    recursive: bool,
}

impl VaultWalker {
    /// Create a recursive walker rooted at `start`.
    pub fn new(start: &Path) -> Self {
        Self { start: start.to_path_buf(), recursive: true }
    }

    /// When false, only the starting directory's own files are visited.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Walk the tree, calling `visit` for every markdown file.
    ///
    /// `cancel` is polled before each entry; once set the walk stops with
    /// [`VaultError::Cancelled`].
    pub fn walk<F>(&self, cancel: &Cancellation, mut visit: F) -> Result<(), VaultError>
    where
        F: FnMut(&WalkedFile),
    {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        for entry in WalkDir::new(&self.start)
            .follow_links(false)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            if cancel.is_cancelled() {
                return Err(VaultError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }

            let modified = match entry.metadata().map(|m| m.modified()) {
                Ok(Ok(modified)) => modified,
                Ok(Err(e)) => {
                    tracing::debug!("skipping {}: {}", entry.path().display(), e);
                    continue;
                }
                Err(e) => {
                    tracing::debug!("skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            visit(&WalkedFile { absolute_path: entry.into_path(), modified });
        }

        Ok(())
    }
}
