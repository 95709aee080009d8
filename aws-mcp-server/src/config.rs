//! Tool Host command line and environment configuration.

use std::net::{SocketAddr, ToSocketAddrs};

use clap::{Parser, ValueEnum};

use crate::error::{ServerError, ServerResult};

/// Path the streamable HTTP endpoint is mounted at
pub const DEFAULT_HTTP_PATH: &str = "/mcp";

/// Which transport the host listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// Newline-delimited JSON-RPC over stdin/stdout; one client, which owns the process
    Stdio,
    /// MCP streamable HTTP; any number of clients
    Http,
}

/// Resolved listening transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostTransport {
    Stdio,
    Http { bind: SocketAddr, path: String },
}

/// MCP Tool Host exposing S3 and DynamoDB tools.
#[derive(Parser, Debug, Clone)]
#[command(name = "aws-mcp-server", version, about)]
pub struct HostConfig {
    /// Transport to serve on.
    #[arg(long, value_enum, env = "MCP_TRANSPORT", default_value = "stdio")]
    pub transport: TransportKind,

    /// Interface to bind in HTTP mode.
    #[arg(long, env = "MCP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind in HTTP mode.
    #[arg(long, env = "MCP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Path of the MCP endpoint in HTTP mode.
    #[arg(long, default_value = DEFAULT_HTTP_PATH)]
    pub path: String,

    /// Named AWS profile (falls back to the SDK's own AWS_PROFILE handling).
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region. When unset, AWS_REGION / AWS_DEFAULT_REGION and the profile are
    /// consulted, then us-east-1.
    #[arg(long)]
    pub region: Option<String>,

    /// Send all AWS requests to this endpoint (LocalStack and similar).
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

impl HostConfig {
    /// Resolve the transport, looking up the bind address for HTTP.
    pub fn host_transport(&self) -> ServerResult<HostTransport> {
        match self.transport {
            TransportKind::Stdio => Ok(HostTransport::Stdio),
            TransportKind::Http => {
                if !self.path.starts_with('/') {
                    return Err(ServerError::Config(format!(
                        "HTTP path must start with '/': {}",
                        self.path
                    )));
                }

                let bind = (self.host.as_str(), self.port)
                    .to_socket_addrs()
                    .map_err(|e| {
                        ServerError::Config(format!("Invalid host '{}': {}", self.host, e))
                    })?
                    .next()
                    .ok_or_else(|| {
                        ServerError::Config(format!("Host '{}' did not resolve", self.host))
                    })?;

                Ok(HostTransport::Http {
                    bind,
                    path: self.path.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
