use rmcp::{
    RoleServer,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

use notevault_core::vault::{Cancellation, Vault};

use super::params::{ListNotesParams, ReadNoteParams, SearchNotesParams, WriteNoteParams};
use super::tools;

/// MCP server exposing a single vault.
#[derive(Clone)]
pub struct NoteServer {
    vault: Arc<Vault>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NoteServer {
    pub fn new(vault: Vault) -> Self {
        Self { vault: Arc::new(vault), tool_router: Self::tool_router() }
    }

    #[tool(description = "List all notes in the vault or a specific subdirectory. Returns note paths with their tags.")]
    async fn list_notes(
        &self,
        params: Parameters<ListNotesParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_blocking(&context, move |vault, cancel| tools::list_notes(vault, params.0, cancel))
            .await
    }

    #[tool(description = "Search for notes matching a query and/or tag filters. Query uses regex pattern matching (case-insensitive).")]
    async fn search_notes(
        &self,
        params: Parameters<SearchNotesParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_blocking(&context, move |vault, cancel| {
            tools::search_notes(vault, params.0, cancel)
        })
        .await
    }

    #[tool(description = "Read the full content of a note by its path.")]
    async fn read_note(
        &self,
        params: Parameters<ReadNoteParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_blocking(&context, move |vault, _| tools::read_note(vault, params.0)).await
    }

    #[tool(description = "Create a new note with the given content. Parent directories are created automatically if needed.")]
    async fn create_note(
        &self,
        params: Parameters<WriteNoteParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_blocking(&context, move |vault, _| tools::create_note(vault, params.0)).await
    }

    #[tool(description = "Update an existing note with new content. The note must already exist.")]
    async fn update_note(
        &self,
        params: Parameters<WriteNoteParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_blocking(&context, move |vault, _| tools::update_note(vault, params.0)).await
    }

    /// Run a vault call on the blocking pool, tripping its cancellation flag
    /// if the client cancels the request first.
    async fn run_blocking<F>(
        &self,
        context: &RequestContext<RoleServer>,
        f: F,
    ) -> Result<CallToolResult, ErrorData>
    where
        F: FnOnce(&Vault, &Cancellation) -> CallToolResult + Send + 'static,
    {
        let vault = Arc::clone(&self.vault);
        let cancel = Cancellation::new();
        let flag = cancel.clone();

        let mut handle = tokio::task::spawn_blocking(move || f(&vault, &flag));

        let joined = tokio::select! {
            joined = &mut handle => joined,
            _ = context.ct.cancelled() => {
                tracing::debug!("request cancelled by client");
                cancel.cancel();
                handle.await
            }
        };

        joined.map_err(|e| ErrorData::internal_error(format!("Tool task failed: {}", e), None))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for NoteServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "notevault".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "notevault MCP server - list, search, read, create and update markdown notes in a sandboxed vault."
                    .into(),
            ),
        }
    }
}
