//! MCP session client.
//!
//! Connects to a Tool Host over one of two transports, runs the initialize
//! handshake, lists the host's tools and invokes them by name. Framing and the
//! handshake itself are handled by `rmcp`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use aws_mcp_core::mcp::{McpClient, McpServerConfig, McpTransport};
//!
//! # async fn example() -> Result<(), aws_mcp_core::mcp::McpError> {
//! // Pipe transport: the client spawns and owns the host process
//! let config = McpServerConfig::new(
//!     "aws",
//!     McpTransport::stdio("aws-mcp-server").env("AWS_PROFILE", "demo"),
//! );
//!
//! // Network transport: the host is already listening
//! let remote = McpServerConfig::new("aws", McpTransport::http("http://localhost:8000/mcp"));
//!
//! let client = McpClient::new(config);
//! client.connect().await?;
//! for tool in client.list_tools().await? {
//!     println!("{}: {}", tool.name, tool.description);
//! }
//! let output = client.call_tool("list_s3_buckets", serde_json::json!({})).await?;
//! println!("{}", output.text);
//! client.disconnect().await?;
//! # let _ = remote;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod transport;

pub use client::{McpClient, ServerIdentity, ToolOutput};
pub use config::{find_server, load_config_file, parse_config, McpConfigFile, McpServerEntry};
pub use transport::{HttpBuilder, McpServerConfig, McpTransport, StdioBuilder};

use thiserror::Error;

/// Errors that can occur during MCP operations
#[derive(Debug, Error)]
pub enum McpError {
    /// The host could not be reached (connection refused, HTTP handshake failed)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The initialize handshake over a pipe failed
    #[error("Handshake error: {0}")]
    Handshake(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The transport could not be created or broke mid-session
    #[error("Transport error: {0}")]
    Transport(String),

    /// The named tool is not in the host's registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments do not satisfy the tool's parameter schema
    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    /// The host rejected the call with a protocol error
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// The tool ran and reported a failure
    #[error("Tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MCP protocol error: {0}")]
    Protocol(String),
}

impl McpError {
    /// Whether the error is scoped to a single invocation and leaves the session usable
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            McpError::UnknownTool(_)
                | McpError::InvalidArguments { .. }
                | McpError::ToolExecution(_)
                | McpError::ToolFailed { .. }
        )
    }
}
