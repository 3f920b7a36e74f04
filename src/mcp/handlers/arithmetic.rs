//! Integer arithmetic tools.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::parse_arguments;
use crate::mcp::format::tool_result;

/// Arguments accepted by the `add` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct AddRequest {
    /// First addend.
    pub(crate) a: i64,
    /// Second addend.
    pub(crate) b: i64,
}

/// Arguments accepted by the `divide` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct DivideRequest {
    /// Dividend.
    pub(crate) x: i64,
    /// Divisor; must not be zero.
    pub(crate) y: i64,
}

pub(crate) fn add(a: i64, b: i64) -> Result<i64, McpError> {
    a.checked_add(b)
        .ok_or_else(|| McpError::invalid_params(format!("{a} + {b} overflows a 64-bit integer"), None))
}

pub(crate) fn divide(x: i64, y: i64) -> Result<f64, McpError> {
    if y == 0 {
        return Err(McpError::invalid_params("Cannot divide by zero", None));
    }
    Ok(x as f64 / y as f64)
}

/// Handle the `add` tool.
pub(crate) async fn handle_add(arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
    let AddRequest { a, b } = parse_arguments(arguments)?;
    let sum = add(a, b)?;
    tracing::info!(a, b, result = sum, "add");
    Ok(tool_result(sum))
}

/// Handle the `divide` tool.
pub(crate) async fn handle_divide(
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let DivideRequest { x, y } = parse_arguments(arguments)?;
    let quotient = divide(x, y)?;
    tracing::info!(x, y, result = quotient, "divide");
    Ok(tool_result(quotient))
}
