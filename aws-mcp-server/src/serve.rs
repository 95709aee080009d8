//! Transport bindings for [`ToolHost`] and the host entry point.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use aws_mcp_tools::{aws_registry, AwsClients};
use axum::Router;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::ServiceExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::{HostConfig, HostTransport};
use crate::error::{ServerError, ServerResult};
use crate::handler::ToolHost;

/// Build AWS clients from `config`, then serve on the configured transport until
/// the client disconnects (stdio) or Ctrl-C (HTTP).
pub async fn run(config: HostConfig) -> ServerResult<()> {
    let transport = config.host_transport()?;

    let mut builder = AwsClients::builder();
    if let Some(profile) = &config.profile {
        builder = builder.profile(profile);
    }
    if let Some(region) = &config.region {
        builder = builder.region(region);
    }
    if let Some(url) = &config.endpoint_url {
        builder = builder.endpoint_url(url);
    }
    let clients = builder.build().await;

    spawn_identity_check(clients.clone());

    let host = ToolHost::new(aws_registry(&clients)?);

    match transport {
        HostTransport::Stdio => serve_stdio(host).await,
        HostTransport::Http { bind, path } => {
            let http = HttpHost::bind(host, bind, &path).await?;
            http.run(shutdown_signal()).await
        }
    }
}

/// Check credentials in the background so a slow credential chain never delays
/// the handshake.
pub(crate) fn spawn_identity_check(clients: AwsClients) -> JoinHandle<()> {
    tokio::spawn(async move { check_identity(&clients).await })
}

/// Log who the credentials belong to. A failure only warns: each tool call will
/// report the same credential problem to its caller.
async fn check_identity(clients: &AwsClients) {
    match clients.caller_identity().await {
        Ok(identity) => tracing::info!(
            account = %identity.account,
            arn = %identity.arn,
            region = clients.region().unwrap_or("unset"),
            "AWS credentials verified"
        ),
        Err(e) => tracing::warn!(
            error = %e,
            "could not verify AWS credentials; tool calls will fail until they are available"
        ),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// Serve one session over stdin/stdout until the client closes the pipe.
pub async fn serve_stdio(host: ToolHost) -> ServerResult<()> {
    tracing::info!(tools = host.registry().len(), "serving MCP over stdio");

    let service = host
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServerError::Serve(format!("initialize failed: {}", e)))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    tracing::info!(?reason, "stdio session ended");
    Ok(())
}

/// Axum router with the MCP streamable HTTP service mounted at `path`.
///
/// Each session gets its own [`ToolHost`] clone; all of them share one registry.
pub fn router(host: ToolHost, path: &str) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(host.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );

    if path == "/" {
        Router::new().fallback_service(service)
    } else {
        Router::new().nest_service(path, service)
    }
}

/// A bound, not yet running, HTTP Tool Host.
///
/// Binding and running are split so callers (and tests binding port 0) can learn
/// the actual address before serving.
pub struct HttpHost {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
    path: String,
}

impl HttpHost {
    pub async fn bind(host: ToolHost, addr: SocketAddr, path: &str) -> ServerResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            listener,
            router: router(host, path),
            local_addr,
            path: path.to_string(),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Full URL clients should connect to
    pub fn url(&self) -> String {
        format!("http://{}{}", self.local_addr, self.path)
    }

    /// Serve until `shutdown` resolves, then stop accepting and drain connections.
    pub async fn run<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(url = %self.url(), "serving MCP over streamable HTTP");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("HTTP host stopped");
        Ok(())
    }
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
