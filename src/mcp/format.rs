//! Formatting helpers shared across MCP handlers and resources.

use rmcp::model::{CallToolResult, ResourceContents};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::json;

pub(crate) const TEXT_PLAIN: &str = "text/plain";

/// Structured payload returned by every demo tool.
#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct ToolOutput<T> {
    /// Value computed by the tool.
    pub(crate) result: T,
}

/// Wrap a tool's return value as structured content: `{"result": value}`.
pub(crate) fn tool_result<T: Serialize>(result: T) -> CallToolResult {
    let payload = serde_json::to_value(ToolOutput { result }).unwrap_or_else(|error| {
        tracing::warn!(%error, "Failed to serialize tool result");
        json!({ "result": null })
    });
    CallToolResult::structured(payload)
}

/// Build plain-text resource contents for MCP resource responses.
pub(crate) fn text_resource_contents(uri: &str, text: String) -> ResourceContents {
    ResourceContents::TextResourceContents {
        uri: uri.to_string(),
        mime_type: Some(TEXT_PLAIN.into()),
        text,
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_result_is_structured() {
        let result = tool_result(5);
        assert_eq!(result.is_error, Some(false));
        let payload = result.structured_content.expect("structured content");
        assert_eq!(payload, json!({ "result": 5 }));
    }

    #[test]
    fn resource_contents_are_plain_text() {
        match text_resource_contents("greeting://Ada", "Hello, Ada!".into()) {
            ResourceContents::TextResourceContents {
                uri, mime_type, text, ..
            } => {
                assert_eq!(uri, "greeting://Ada");
                assert_eq!(mime_type.as_deref(), Some(TEXT_PLAIN));
                assert_eq!(text, "Hello, Ada!");
            }
            other => panic!("unexpected contents: {other:?}"),
        }
    }
}
