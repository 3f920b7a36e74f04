//! Demo MCP tool server entrypoint (stdio transport).
//!
//! Serves the `add`, `divide`, and `echo` tools plus the `greeting://{name}` resource over stdio
//! for editor and agent integrations. Logs go to stderr and the log file; stdout carries only
//! protocol frames.
use anyhow::{Context, Result};
use browsemate::{
    logging::{self, ConsoleTarget},
    mcp::{DemoToolServer, SERVER_NAME},
};
use rmcp::{service::ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing(ConsoleTarget::Stderr, "info");
    tracing::info!(server = SERVER_NAME, "Starting MCP server over stdio");

    let service = DemoToolServer::new()
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    tracing::info!(server = SERVER_NAME, "MCP server stopped");
    Ok(())
}
