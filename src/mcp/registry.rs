use std::{collections::HashMap, future::Future, pin::Pin};

use rmcp::ErrorData as McpError;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ReadResourceRequestParam, ReadResourceResult,
};

use super::server::DemoToolServer;

pub type ResourceFuture =
    Pin<Box<dyn Future<Output = Result<ReadResourceResult, McpError>> + Send>>;
pub type ToolFuture = Pin<Box<dyn Future<Output = Result<CallToolResult, McpError>> + Send>>;

pub type ResourceHandler = fn(&DemoToolServer, ReadResourceRequestParam) -> ResourceFuture;
pub type ToolHandler = fn(&DemoToolServer, CallToolRequestParam) -> ToolFuture;

/// Registry mapping URI schemes and tool names to handler functions.
pub struct Registry {
    pub schemes: HashMap<&'static str, ResourceHandler>,
    pub tools: HashMap<&'static str, ToolHandler>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            schemes: HashMap::new(),
            tools: HashMap::new(),
        }
    }

    /// Route every `scheme://...` URI to `handler`.
    pub fn register_scheme(&mut self, scheme: &'static str, handler: ResourceHandler) {
        self.schemes.insert(scheme, handler);
    }

    pub fn register_tool(&mut self, name: &'static str, handler: ToolHandler) {
        self.tools.insert(name, handler);
    }

    pub fn resource_handler(&self, uri: &str) -> Option<ResourceHandler> {
        let (scheme, _) = uri.split_once("://")?;
        self.schemes.get(scheme).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_resource(_server: &DemoToolServer, _request: ReadResourceRequestParam) -> ResourceFuture {
        Box::pin(async { Ok(ReadResourceResult { contents: Vec::new() }) })
    }

    #[test]
    fn resources_resolve_by_scheme() {
        let mut registry = Registry::new();
        registry.register_scheme("greeting", noop_resource);
        assert!(registry.resource_handler("greeting://Ada").is_some());
        assert!(registry.resource_handler("weather://Oslo").is_none());
        assert!(registry.resource_handler("greeting").is_none());
    }
}
