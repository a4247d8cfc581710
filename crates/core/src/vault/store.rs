//! Vault operations: list, search, read, create and update notes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use regex::RegexBuilder;
use serde::Serialize;

use super::cache::{CacheEntry, ContentCache};
use super::guard::PathGuard;
use super::tags::{extract_tags, normalize_tag};
use super::walker::{VaultWalker, WalkedFile};
use super::{Cancellation, VaultError};

/// A note as returned by List and Search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteInfo {
    /// Path relative to the vault root, `/`-separated.
    pub path: String,
    /// Lowercase tags found in the note at read time.
    pub tags: Vec<String>,
}

/// A directory of markdown notes with a sandboxed root.
///
/// The root is fixed at construction. A `Vault` is `Send + Sync`; share it
/// behind an `Arc` to serve concurrent callers.
#[derive(Debug)]
pub struct Vault {
    guard: PathGuard,
    cache: ContentCache,
}

impl Vault {
    /// Open a vault rooted at an existing directory.
    pub fn open(root: &Path) -> Result<Self, VaultError> {
        let invalid = |reason: String| VaultError::InvalidRoot { path: root.to_path_buf(), reason };

        let metadata = fs::metadata(root).map_err(|e| invalid(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }

        let root = root.canonicalize().map_err(|e| invalid(e.to_string()))?;
        tracing::debug!("opened vault at {}", root.display());

        Ok(Self { guard: PathGuard::new(root), cache: ContentCache::new() })
    }

    /// Canonical vault root.
    pub fn root(&self) -> &Path {
        self.guard.root()
    }

    /// List notes below `subpath`.
    ///
    /// With `recursive` false only the notes directly inside `subpath` are
    /// returned. Unreadable files are skipped.
    pub fn list(
        &self,
        subpath: &str,
        recursive: bool,
        cancel: &Cancellation,
    ) -> Result<Vec<NoteInfo>, VaultError> {
        let start = self.guard.resolve_dir(subpath)?;
        let mut notes = Vec::new();

        VaultWalker::new(&start).recursive(recursive).walk(cancel, |file| {
            let Some(entry) = self.load(file) else { return };
            if let Some(path) = self.guard.relative(&file.absolute_path) {
                notes.push(NoteInfo { path, tags: entry.tags });
            }
        })?;

        Ok(notes)
    }

    /// Search every note below `subpath`.
    ///
    /// `query`, when non-empty, is a case-insensitive regular expression that
    /// must match the content. `tags`, when non-empty, requires the note to
    /// carry at least one of them. Both filters must hold.
    pub fn search(
        &self,
        query: &str,
        subpath: &str,
        tags: &[String],
        cancel: &Cancellation,
    ) -> Result<Vec<NoteInfo>, VaultError> {
        let start = self.guard.resolve_dir(subpath)?;

        let pattern = if query.is_empty() {
            None
        } else {
            let re = RegexBuilder::new(query).case_insensitive(true).build().map_err(|e| {
                VaultError::InvalidQuery { query: query.to_string(), source: e }
            })?;
            Some(re)
        };

        let wanted: Vec<String> =
            tags.iter().map(|t| normalize_tag(t)).filter(|t| !t.is_empty()).collect();

        let mut results = Vec::new();

        VaultWalker::new(&start).walk(cancel, |file| {
            let Some(entry) = self.load(file) else { return };

            if pattern.as_ref().is_some_and(|re| !re.is_match(&entry.content)) {
                return;
            }

            if !wanted.is_empty() && !entry.tags.iter().any(|t| wanted.contains(t)) {
                return;
            }

            if let Some(path) = self.guard.relative(&file.absolute_path) {
                results.push(NoteInfo { path, tags: entry.tags });
            }
        })?;

        Ok(results)
    }

    /// Read the full content of a note.
    pub fn read(&self, path: &str) -> Result<String, VaultError> {
        let full = self.guard.resolve(path)?;

        let metadata = fs::metadata(&full).map_err(|e| not_found_or(e, path, "stat", &full))?;

        if let Some(entry) = self.cache.get(&full) {
            tracing::debug!("cache hit {}", path);
            return Ok(entry.content);
        }

        let content = read_text(&full).map_err(|e| not_found_or(e, path, "read", &full))?;

        match metadata.modified() {
            Ok(modified) => self.cache.set(&full, &content, &extract_tags(&content), modified),
            Err(e) => tracing::debug!("not caching {}: {}", path, e),
        }

        Ok(content)
    }

    /// Create a new note. Fails if anything already exists at `path`.
    ///
    /// Missing parent directories are created. The file is opened with
    /// create-new semantics so two concurrent creates of the same path cannot
    /// both succeed.
    pub fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.guard.resolve(path)?;

        if full.symlink_metadata().is_ok() {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| VaultError::io("create directories", parent, e))?;
        }

        let file = fs::OpenOptions::new().write(true).create_new(true).open(&full).map_err(
            |e| match e.kind() {
                io::ErrorKind::AlreadyExists => VaultError::AlreadyExists(path.to_string()),
                _ => VaultError::io("create", &full, e),
            },
        )?;
        write_fresh(file, &full, content)?;

        self.refresh(&full, content);
        tracing::info!("created note {}", path);
        Ok(())
    }

    /// Overwrite an existing note. Fails if it does not exist.
    pub fn update(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.guard.resolve(path)?;

        fs::metadata(&full).map_err(|e| not_found_or(e, path, "stat", &full))?;
        fs::write(&full, content).map_err(|e| VaultError::io("write", &full, e))?;

        self.refresh(&full, content);
        tracing::info!("updated note {}", path);
        Ok(())
    }

    /// Serve a walked file from cache, or read it and populate the cache.
    fn load(&self, file: &WalkedFile) -> Option<CacheEntry> {
        if let Some(entry) = self.cache.get(&file.absolute_path) {
            return Some(entry);
        }

        let content = match read_text(&file.absolute_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("skipping {}: {}", file.absolute_path.display(), e);
                return None;
            }
        };

        let tags = extract_tags(&content);
        self.cache.set(&file.absolute_path, &content, &tags, file.modified);
        Some(CacheEntry { content, tags, modified: file.modified })
    }

    // Best effort: the write already succeeded, so a failed stat only costs
    // a cache miss later.
    fn refresh(&self, full: &Path, content: &str) {
        match fs::metadata(full).and_then(|m| m.modified()) {
            Ok(modified) => self.cache.set(full, content, &extract_tags(content), modified),
            Err(e) => {
                tracing::warn!("could not refresh cache for {}: {}", full.display(), e);
                self.cache.delete(full);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn cached(&self, path: &str) -> Option<CacheEntry> {
        self.cache.get(&self.guard.resolve(path).ok()?)
    }
}

/// Read a note as text. Invalid UTF-8 is replaced rather than rejected so
/// legacy-encoded notes stay visible.
fn read_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the body of a file that was just created. On failure the partial
/// file is removed so a retried create does not hit `AlreadyExists`.
fn write_fresh(mut file: impl Write, full: &Path, content: &str) -> Result<(), VaultError> {
    let Err(e) = file.write_all(content.as_bytes()).and_then(|_| file.flush()) else {
        return Ok(());
    };

    drop(file);
    if let Err(rm) = fs::remove_file(full) {
        tracing::warn!("could not remove partial note {}: {}", full.display(), rm);
    }
    Err(VaultError::io("write", full, e))
}

fn not_found_or(e: io::Error, path: &str, op: &'static str, full: &Path) -> VaultError {
    if e.kind() == io::ErrorKind::NotFound {
        VaultError::NoteNotFound(path.to_string())
    } else {
        VaultError::io(op, full, e)
    }
}
