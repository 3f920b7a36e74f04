//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::mcp::{
    format::TEXT_PLAIN,
    handlers::{
        arithmetic::{handle_add, handle_divide},
        echo::handle_echo,
        greeting::{GREETING_SCHEME, GREETING_TEMPLATE_URI, read_greeting},
    },
    registry, schemas,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, ListResourceTemplatesResult,
        ListToolsResult, RawResourceTemplate, ReadResourceRequestParam, ReadResourceResult,
        ResourceTemplate, ServerCapabilities, ServerInfo, Tool, ToolAnnotations,
    },
};

/// Name reported to MCP clients during initialization.
pub const SERVER_NAME: &str = "browsemate-tools";

/// Demo MCP server exposing arithmetic, echo, and greeting handlers.
#[derive(Clone)]
pub struct DemoToolServer {
    registry: Arc<registry::Registry>,
}

impl Default for DemoToolServer {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoToolServer {
    /// Create a server with every demo tool and resource registered.
    pub fn new() -> Self {
        let mut registry = registry::Registry::new();
        registry.register_scheme(GREETING_SCHEME, resource_greeting);

        registry.register_tool("add", tool_add);
        registry.register_tool("divide", tool_divide);
        registry.register_tool("echo", tool_echo);

        Self {
            registry: Arc::new(registry),
        }
    }

    fn describe_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: Cow::Borrowed("add"),
                title: Some("Add Numbers".to_string()),
                description: Some(Cow::Borrowed("Add two integers and return the sum.")),
                input_schema: Arc::new(schemas::add_input_schema()),
                output_schema: Some(Arc::new(schemas::integer_output_schema())),
                annotations: Some(
                    ToolAnnotations::with_title("Add Numbers")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("divide"),
                title: Some("Divide Numbers".to_string()),
                description: Some(Cow::Borrowed(
                    "Divide x by y and return a floating-point quotient; y must not be zero.",
                )),
                input_schema: Arc::new(schemas::divide_input_schema()),
                output_schema: Some(Arc::new(schemas::number_output_schema())),
                annotations: Some(
                    ToolAnnotations::with_title("Divide Numbers")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("echo"),
                title: Some("Echo".to_string()),
                description: Some(Cow::Borrowed("Send a message back prefixed with `Echo: `.")),
                input_schema: Arc::new(schemas::echo_input_schema()),
                output_schema: Some(Arc::new(schemas::string_output_schema())),
                annotations: Some(
                    ToolAnnotations::with_title("Echo")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
        ]
    }

    fn describe_resource_templates(&self) -> Vec<ResourceTemplate> {
        let greeting = RawResourceTemplate {
            uri_template: GREETING_TEMPLATE_URI.into(),
            name: "greeting".into(),
            title: Some("Greeting".into()),
            description: Some("Personalized greeting: replace {name} and call readResource".into()),
            mime_type: Some(TEXT_PLAIN.into()),
        };

        vec![greeting.no_annotation()]
    }
}

fn resource_greeting(
    _server: &DemoToolServer,
    request: ReadResourceRequestParam,
) -> registry::ResourceFuture {
    Box::pin(async move { read_greeting(request.uri).await })
}

fn tool_add(_server: &DemoToolServer, request: CallToolRequestParam) -> registry::ToolFuture {
    Box::pin(async move { handle_add(request.arguments).await })
}

fn tool_divide(_server: &DemoToolServer, request: CallToolRequestParam) -> registry::ToolFuture {
    Box::pin(async move { handle_divide(request.arguments).await })
}

fn tool_echo(_server: &DemoToolServer, request: CallToolRequestParam) -> registry::ToolFuture {
    Box::pin(async move { handle_echo(request.arguments).await })
}

impl ServerHandler for DemoToolServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = SERVER_NAME.to_string();
        implementation.title = Some("BrowseMate Demo Tools".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: implementation,
            instructions: Some(
                "Demo tools: add and divide integers, echo a message, or read greeting://{name}."
                    .into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_resource_templates(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourceTemplatesResult, McpError>> + Send + '_
    {
        let templates = self.describe_resource_templates();
        std::future::ready(Ok(ListResourceTemplatesResult::with_all_items(templates)))
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            if let Some(handler) = self.registry.resource_handler(&request.uri) {
                return handler(self, request).await;
            }

            tracing::debug!(uri = %request.uri, "Unknown resource URI");
            Err(McpError::invalid_params(
                format!("Unknown resource URI: {}", request.uri),
                None,
            ))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            if let Some(handler) = self.registry.tools.get(request.name.as_ref()) {
                return handler(self, request).await;
            }

            tracing::debug!(tool = %request.name, "Unknown tool");
            Err(McpError::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_are_registered_and_described() {
        let server = DemoToolServer::new();
        let mut described: Vec<String> = server
            .describe_tools()
            .into_iter()
            .map(|tool| tool.name.into_owned())
            .collect();
        described.sort();
        let mut registered: Vec<&str> = server.registry.tools.keys().copied().collect();
        registered.sort();
        assert_eq!(described, registered);
    }

    #[test]
    fn info_names_the_server() {
        let info = DemoToolServer::new().get_info();
        assert_eq!(info.server_info.name, SERVER_NAME);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
    }
}
