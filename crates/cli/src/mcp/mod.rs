//! MCP server over stdio.

mod params;
mod server;
mod tools;

use notevault_core::vault::Vault;
use rmcp::{ServiceExt, transport::stdio};

use server::NoteServer;

/// Serve `vault` on stdin/stdout until the client disconnects.
pub async fn run(vault: Vault) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("serving vault at {}", vault.root().display());

    let server = NoteServer::new(vault);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error starting server: {}", e);
    })?;

    tracing::info!("notevault MCP server started");
    service.waiting().await?;

    Ok(())
}
