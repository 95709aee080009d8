//! Fixed set of tools a Tool Host serves.

use serde_json::Value;

use crate::descriptor::ToolDescriptor;
use crate::tool::{box_tool, DynTool, Tool, ToolError, ToolResult};

/// Errors raised by [`ToolRegistry`]
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Ordered collection of tools, looked up by name.
///
/// Registration happens once at startup; afterwards the registry is only read,
/// so it can be shared behind an `Arc` by every session.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.register_boxed(box_tool(tool))
    }

    /// Register an already boxed tool. Names must be unique.
    pub fn register_boxed(&mut self, tool: Box<dyn DynTool>) -> Result<(), RegistryError> {
        if self.contains(tool.name()) {
            return Err(RegistryError::DuplicateTool(tool.name().to_string()));
        }
        tracing::debug!(tool = tool.name(), "registered tool");
        self.tools.push(tool);
        Ok(())
    }

    /// Build a registry from boxed tools, as returned by `box_tools!`
    pub fn from_tools(
        tools: impl IntoIterator<Item = Box<dyn DynTool>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for tool in tools {
            registry.register_boxed(tool)?;
        }
        Ok(registry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Descriptors for every registered tool, in registration order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor::from_schema(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Execute the named tool with raw JSON arguments
    pub async fn call(&self, name: &str, arguments: Value) -> Result<ToolResult, RegistryError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))?;

        Ok(tool.execute_raw(arguments).await?)
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name()))
            .finish()
    }
}
