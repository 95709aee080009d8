//! MCP server handler dispatching to a [`ToolRegistry`].

use std::sync::Arc;

use aws_mcp_core::{RegistryError, ToolRegistry};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;

/// Serves a fixed tool registry over MCP.
///
/// Cheap to clone; every HTTP session gets its own clone sharing the same registry.
#[derive(Clone)]
pub struct ToolHost {
    registry: Arc<ToolRegistry>,
    name: String,
    version: String,
}

impl ToolHost {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the name and version reported in the handshake
    pub fn with_identity(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Registry contents as MCP tool definitions, in registration order
    pub fn tool_definitions(&self) -> Vec<McpTool> {
        self.registry
            .descriptors()
            .into_iter()
            .map(|d| {
                let schema = match d.input_schema {
                    Value::Object(map) => map,
                    _ => Default::default(),
                };
                McpTool::new(d.name, d.description, Arc::new(schema))
            })
            .collect()
    }

    /// Run one invocation.
    ///
    /// Unknown tools and bad arguments are protocol errors (`invalid_params`); a tool
    /// that runs and fails produces an `isError` result so the session carries on.
    pub async fn invoke(&self, request: CallToolRequestParam) -> Result<CallToolResult, ErrorData> {
        let name = request.name.as_ref();
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);

        match self.registry.call(name, arguments).await {
            Ok(result) => {
                tracing::info!(tool = name, "tool call succeeded");
                Ok(CallToolResult::success(vec![Content::text(result.as_text())]))
            }
            Err(RegistryError::UnknownTool(tool)) => {
                tracing::warn!(tool = %tool, "call to unknown tool");
                Err(ErrorData::invalid_params(format!("Unknown tool: {}", tool), None))
            }
            Err(RegistryError::Tool(err)) if err.is_invalid_input() => {
                tracing::warn!(tool = name, error = %err, "rejected tool arguments");
                Err(ErrorData::invalid_params(err.to_string(), None))
            }
            Err(RegistryError::Tool(err)) => {
                tracing::warn!(tool = name, error = %err, "tool call failed");
                Ok(CallToolResult::error(vec![Content::text(format!("Error: {}", err))]))
            }
            Err(err @ RegistryError::DuplicateTool(_)) => {
                Err(ErrorData::internal_error(err.to_string(), None))
            }
        }
    }
}

impl ServerHandler for ToolHost {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                ..Default::default()
            },
            instructions: Some(
                "Read-only access to S3 buckets, S3 objects and DynamoDB items.".to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(request).await
    }
}

impl std::fmt::Debug for ToolHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolHost")
            .field("name", &self.name)
            .field("tools", &self.registry)
            .finish()
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
