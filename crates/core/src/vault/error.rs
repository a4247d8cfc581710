//! Error type shared by every vault operation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    /// The vault root could not be opened.
    #[error("invalid vault root {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    /// Empty or otherwise malformed note path.
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    /// The path resolves outside the vault root.
    #[error("path traversal not allowed: {0}")]
    PathTraversal(String),

    /// Only `.md` files are notes.
    #[error("only .md files allowed: {0}")]
    NotMarkdown(String),

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("note already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid query regex {query:?}: {source}")]
    InvalidQuery {
        query: String,
        #[source]
        source: regex::Error,
    },

    #[error("operation cancelled")]
    Cancelled,

    /// Any other filesystem failure.
    #[error("failed to {op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VaultError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { op, path: path.into(), source }
    }
}
