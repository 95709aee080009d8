use aws_mcp_core::mcp::McpError;

/// Errors surfaced by the client CLI
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Mcp(#[from] McpError),

    /// Writing the report failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
