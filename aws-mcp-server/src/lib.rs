//! # aws-mcp-server
//!
//! MCP Tool Host serving the `aws-mcp-tools` registry.
//!
//! Two transports are supported, chosen once at startup:
//!
//! - **stdio**: the client spawns this process and talks newline-delimited
//!   JSON-RPC over its stdin/stdout. The host exits when stdin closes.
//! - **streamable HTTP**: the host listens on `host:port` and serves any number of
//!   independent sessions at `/mcp`.
//!
//! Logs always go to stderr; in stdio mode stdout carries protocol traffic only.
//!
//! ```rust,no_run
//! use aws_mcp_server::{HttpHost, ToolHost};
//! use aws_mcp_tools::{aws_registry, AwsClients};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let clients = AwsClients::from_env().await;
//! let host = ToolHost::new(aws_registry(&clients)?);
//!
//! let http = HttpHost::bind(host, "127.0.0.1:8000".parse()?, "/mcp").await?;
//! http.run(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod serve;

pub use config::{HostConfig, HostTransport, TransportKind, DEFAULT_HTTP_PATH};
pub use error::{ServerError, ServerResult};
pub use handler::ToolHost;
pub use serve::{router, run, serve_stdio, HttpHost};
