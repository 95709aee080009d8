//! Error types for the Tool Host.

use std::net::SocketAddr;

/// Errors that stop the Tool Host from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The HTTP listener could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The transport failed while serving.
    #[error("Serve error: {0}")]
    Serve(String),

    /// Invalid host configuration (bad address, empty path).
    #[error("Configuration error: {0}")]
    Config(String),

    /// AWS client or tool registry setup failed.
    #[error("AWS setup error: {0}")]
    Aws(String),
}

impl From<aws_mcp_core::RegistryError> for ServerError {
    fn from(err: aws_mcp_core::RegistryError) -> Self {
        ServerError::Aws(err.to_string())
    }
}

/// Result type alias for host operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
