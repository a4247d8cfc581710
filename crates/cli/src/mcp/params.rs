//! Tool parameter schemas.

use schemars::JsonSchema;
use serde::Deserialize;

fn default_recursive() -> bool {
    true
}

/// Parameters for the list_notes tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListNotesParams {
    /// Optional subdirectory path to list notes from. If empty, lists from vault root.
    #[serde(default)]
    pub path: String,
    /// Whether to recursively list notes in subdirectories.
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

/// Parameters for the search_notes tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchNotesParams {
    /// Regex pattern to search for in note content. Case-insensitive.
    pub query: String,
    /// Optional subdirectory path to search within. If empty, searches entire vault.
    #[serde(default)]
    pub path: String,
    /// Optional list of tags to filter by. Notes must have at least one of these tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parameters for the read_note tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadNoteParams {
    /// Path to the note file (relative to vault root, must end with .md).
    pub path: String,
}

/// Parameters for the create_note and update_note tools
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteNoteParams {
    /// Path to the note file (relative to vault root, must end with .md).
    pub path: String,
    /// Content of the note in markdown format.
    pub content: String,
}
