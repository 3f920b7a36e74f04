//! The `greeting://{name}` resource template.

use rmcp::{ErrorData as McpError, model::ReadResourceResult};

use crate::mcp::format::text_resource_contents;

pub(crate) const GREETING_SCHEME: &str = "greeting";
pub(crate) const GREETING_TEMPLATE_URI: &str = "greeting://{name}";

/// Extract the name segment from a `greeting://` URI.
pub(crate) fn greeting_name(uri: &str) -> Result<&str, McpError> {
    let name = uri
        .strip_prefix("greeting://")
        .ok_or_else(|| McpError::invalid_params(format!("Unknown resource URI: {uri}"), None))?;
    if name.trim().is_empty() {
        return Err(McpError::invalid_params(
            "Name missing in greeting URI",
            None,
        ));
    }
    Ok(name)
}

/// Read a personalized greeting.
pub(crate) async fn read_greeting(uri: String) -> Result<ReadResourceResult, McpError> {
    let name = greeting_name(&uri)?;
    let greeting = format!("Hello, {name}!");
    tracing::info!(uri = %uri, result = %greeting, "greeting");
    Ok(ReadResourceResult {
        contents: vec![text_resource_contents(&uri, greeting)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_comes_from_uri() {
        assert_eq!(greeting_name("greeting://Ada").expect("name"), "Ada");
        assert!(greeting_name("greeting://").is_err());
        assert!(greeting_name("weather://Oslo").is_err());
    }
}
