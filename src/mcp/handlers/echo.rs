//! The `echo` tool.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::parse_arguments;
use crate::mcp::format::tool_result;

/// Arguments accepted by the `echo` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct EchoRequest {
    /// Text to send back.
    pub(crate) message: String,
}

/// Handle the `echo` tool by prefixing the message.
pub(crate) async fn handle_echo(arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
    let EchoRequest { message } = parse_arguments(arguments)?;
    let reply = format!("Echo: {message}");
    tracing::info!(message = %message, result = %reply, "echo");
    Ok(tool_result(reply))
}
