use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result types that tools can return.
///
/// Every result is delivered to MCP clients as a single text block, so both
/// variants collapse to a string via [`ToolResult::as_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolResult {
    /// Plain text response
    Text(String),

    /// Structured JSON data, rendered compactly when sent over the wire
    Json(Value),
}

impl ToolResult {
    /// Create a text result from a string
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Get the text content, rendering JSON results as compact JSON
    pub fn as_text(&self) -> String {
        match self {
            ToolResult::Text(s) => s.clone(),
            ToolResult::Json(v) => v.to_string(),
        }
    }
}

impl From<String> for ToolResult {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ToolResult {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Errors that can occur during tool execution
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The arguments did not match the tool's input type or failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The underlying AWS call failed (credentials, network, missing resource).
    #[error("AWS error: {0}")]
    Aws(String),

    /// The response could not be decoded into text.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("{0}")]
    Custom(String),
}

impl ToolError {
    /// Whether the error was caused by the caller's arguments rather than by execution.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ToolError::InvalidInput(_))
    }
}

impl From<String> for ToolError {
    fn from(s: String) -> Self {
        Self::Custom(s)
    }
}

impl From<&str> for ToolError {
    fn from(s: &str) -> Self {
        Self::Custom(s.to_string())
    }
}

/// Trait for implementing tools served by the Tool Host.
///
/// Tools define an input type with `#[derive(Deserialize, JsonSchema)]` so the
/// advertised JSON schema always matches what `execute` accepts.
///
/// # Example
///
/// ```rust
/// use aws_mcp_core::{Tool, ToolResult, ToolError};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct GreetInput {
///     /// Who to greet
///     name: String,
/// }
///
/// struct GreetTool;
///
/// impl Tool for GreetTool {
///     type Input = GreetInput;
///
///     fn name(&self) -> &str { "greet" }
///     fn description(&self) -> &str { "Say hello" }
///
///     fn execute(&self, input: Self::Input) -> impl std::future::Future<Output = Result<ToolResult, ToolError>> + Send {
///         async move { Ok(format!("Hello, {}!", input.name).into()) }
///     }
/// }
/// ```
pub trait Tool: Send + Sync {
    /// The input type for this tool. Must implement `Deserialize` and `JsonSchema`.
    type Input: DeserializeOwned + JsonSchema;

    /// The name of the tool (e.g., "list_s3_buckets")
    fn name(&self) -> &str;

    /// A description of what the tool does
    fn description(&self) -> &str;

    /// Execute the tool with typed input
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl std::future::Future<Output = Result<ToolResult, ToolError>> + Send;

    /// Get the JSON schema for this tool's input.
    ///
    /// Generated from the `JsonSchema` derive on `Input`.
    fn input_schema(&self) -> Value {
        schemars::schema_for!(Self::Input).to_value()
    }
}

/// Object-safe trait for dynamic tool dispatch (used by [`crate::ToolRegistry`]).
///
/// Implement `Tool` instead and use `box_tool()` to convert.
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> Value;
    fn execute_raw(
        &self,
        input: Value,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<ToolResult, ToolError>> + Send + '_>,
    >;
}

/// Convert a `Tool` into a type-erased `Box<dyn DynTool>` for storage in collections.
pub fn box_tool<T: Tool + 'static>(tool: T) -> Box<dyn DynTool> {
    Box::new(ToolWrapper(tool))
}

/// Create a `Vec<Box<dyn DynTool>>` from heterogeneous tool types.
///
/// ```ignore
/// let tools = box_tools![ListS3BucketsTool::new(s3.clone()), GetS3ObjectTool::new(s3)];
/// ```
#[macro_export]
macro_rules! box_tools {
    ($($tool:expr),* $(,)?) => {
        vec![$($crate::tool::box_tool($tool)),*]
    };
}

struct ToolWrapper<T>(T);

impl<T: Tool + 'static> DynTool for ToolWrapper<T> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn description(&self) -> &str {
        self.0.description()
    }

    fn input_schema(&self) -> Value {
        self.0.input_schema()
    }

    fn execute_raw(
        &self,
        input: Value,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<ToolResult, ToolError>> + Send + '_>,
    > {
        Box::pin(async move {
            // Clients may omit `arguments` entirely for parameterless tools
            let input = if input.is_null() {
                Value::Object(Default::default())
            } else {
                input
            };

            let typed_input: T::Input = serde_json::from_value(input).map_err(|e| {
                ToolError::InvalidInput(format!("Failed to deserialize input: {}", e))
            })?;

            self.0.execute(typed_input).await
        })
    }
}
