//! Helpers shared by the integration tests.
#![allow(dead_code)]

pub mod stub_tools;

use std::time::Duration;

use aws_mcp_core::mcp::{McpClient, McpServerConfig, McpTransport, StdioBuilder};
use aws_mcp_server::{HttpHost, ToolHost};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Path of the stub host binary built alongside the tests
pub fn stub_host_command() -> String {
    env!("CARGO_BIN_EXE_stub_tool_host").to_string()
}

pub fn stub_stdio() -> StdioBuilder {
    McpTransport::stdio(stub_host_command())
}

pub fn stdio_client(transport: StdioBuilder) -> McpClient {
    McpClient::new(McpServerConfig::new("stub", transport))
}

/// An HTTP host running in this process on an ephemeral port
pub struct RunningHttpHost {
    pub url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<aws_mcp_server::ServerResult<()>>,
}

impl RunningHttpHost {
    pub async fn start(host: ToolHost) -> Self {
        let http = HttpHost::bind(host, "127.0.0.1:0".parse().unwrap(), "/mcp")
            .await
            .unwrap();
        let url = http.url();

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(http.run(async {
            let _ = rx.await;
        }));

        Self {
            url,
            shutdown: Some(tx),
            handle,
        }
    }

    pub fn client(&self, name: &str) -> McpClient {
        McpClient::new(McpServerConfig::new(name, McpTransport::http(&self.url)))
    }

    /// Signal shutdown; open connections are abandoned after a short grace period
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if tokio::time::timeout(Duration::from_secs(2), &mut self.handle)
            .await
            .is_err()
        {
            self.handle.abort();
        }
    }
}
