//! Tool bodies. Each runs synchronously against the vault and renders
//! failures as error results rather than protocol errors.

use notevault_core::vault::{Cancellation, NoteInfo, Vault, VaultError};
use rmcp::model::{CallToolResult, Content};

use super::params::{ListNotesParams, ReadNoteParams, SearchNotesParams, WriteNoteParams};

pub fn list_notes(vault: &Vault, params: ListNotesParams, cancel: &Cancellation) -> CallToolResult {
    match vault.list(&params.path, params.recursive, cancel) {
        Ok(notes) => notes_result(&notes, "notes"),
        Err(e) => error_text(format!("Error listing notes: {}", e)),
    }
}

pub fn search_notes(
    vault: &Vault,
    params: SearchNotesParams,
    cancel: &Cancellation,
) -> CallToolResult {
    match vault.search(&params.query, &params.path, &params.tags, cancel) {
        Ok(notes) => notes_result(&notes, "search results"),
        Err(e) => error_text(format!("Error searching notes: {}", e)),
    }
}

pub fn read_note(vault: &Vault, params: ReadNoteParams) -> CallToolResult {
    match vault.read(&params.path) {
        Ok(content) => CallToolResult::success(vec![Content::text(content)]),
        Err(e) => error_text(describe_error(&e, "reading", &params.path)),
    }
}

pub fn create_note(vault: &Vault, params: WriteNoteParams) -> CallToolResult {
    match vault.create(&params.path, &params.content) {
        Ok(()) => success_text(format!("Successfully created note: {}", params.path)),
        Err(e) => error_text(describe_error(&e, "creating", &params.path)),
    }
}

pub fn update_note(vault: &Vault, params: WriteNoteParams) -> CallToolResult {
    match vault.update(&params.path, &params.content) {
        Ok(()) => success_text(format!("Successfully updated note: {}", params.path)),
        Err(e) => error_text(describe_error(&e, "updating", &params.path)),
    }
}

/// User-facing message for a failed single-note operation.
pub fn describe_error(err: &VaultError, operation: &str, path: &str) -> String {
    match err {
        VaultError::NoteNotFound(_) => format!("Note not found: {}", path),
        VaultError::AlreadyExists(_) => format!("Note already exists: {}", path),
        VaultError::PathTraversal(_) => "Invalid path: path traversal not allowed".to_string(),
        VaultError::InvalidPath(_) => "Invalid path format".to_string(),
        VaultError::NotMarkdown(_) => "Only .md files are allowed".to_string(),
        other => format!("Error {} note: {}", operation, other),
    }
}

fn notes_result(notes: &[NoteInfo], what: &str) -> CallToolResult {
    match serde_json::to_string_pretty(notes) {
        Ok(json) => success_text(json),
        Err(e) => error_text(format!("Error marshaling {}: {}", what, e)),
    }
}

fn success_text(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn error_text(text: String) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text)])
}
