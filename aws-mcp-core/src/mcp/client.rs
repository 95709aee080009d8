use super::{McpError, McpServerConfig, McpTransport};
use crate::descriptor::ToolDescriptor;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use rmcp::service::{ClientInitializeError, RunningService, ServiceError};
use rmcp::transport::streamable_http_client::{
    StreamableHttpClientTransport, StreamableHttpClientTransportConfig,
};
use rmcp::transport::TokioChildProcess;
use rmcp::{RoleClient, ServiceExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::RwLock;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// One session with a Tool Host.
///
/// The session connects lazily: the first operation spawns or dials the host and
/// completes the initialize handshake before anything else is sent.
pub struct McpClient {
    name: String,
    config: McpServerConfig,
    service: Arc<RwLock<Option<RunningService<RoleClient, ()>>>>,
    /// Registry as last reported by the host, used to validate calls
    tools: Arc<RwLock<Option<Vec<ToolDescriptor>>>>,
}

/// Identity the host reported during the handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
    pub protocol_version: String,
    pub instructions: Option<String>,
}

/// Text a tool invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub tool: String,
    pub text: String,
    /// The tool ran but reported failure (e.g. the S3 object does not exist)
    pub is_error: bool,
}

impl ToolOutput {
    fn from_result(tool: &str, result: CallToolResult) -> Self {
        let text = result
            .content
            .iter()
            .filter_map(|content| content.raw.as_text())
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            tool: tool.to_string(),
            text,
            is_error: result.is_error.unwrap_or(false),
        }
    }

    /// Convert an error result into `McpError::ToolFailed`
    pub fn into_result(self) -> Result<String, McpError> {
        if self.is_error {
            Err(McpError::ToolFailed {
                tool: self.tool,
                message: self.text,
            })
        } else {
            Ok(self.text)
        }
    }
}

impl McpClient {
    /// Create a new client from configuration. Nothing is spawned or dialed yet.
    pub fn new(config: McpServerConfig) -> Self {
        Self {
            name: config.name.clone(),
            config,
            service: Arc::new(RwLock::new(None)),
            tools: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the server name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &McpServerConfig {
        &self.config
    }

    /// Establish the transport and run the initialize handshake.
    ///
    /// Idempotent: calling it on a connected client does nothing.
    pub async fn connect(&self) -> Result<(), McpError> {
        let mut service_guard = self.service.write().await;

        if service_guard.is_some() {
            return Ok(());
        }

        let service: RunningService<RoleClient, ()> = match &self.config.transport {
            McpTransport::Stdio {
                command,
                args,
                env,
                inherit_env,
            } => {
                let mut cmd = Command::new(command);
                cmd.args(args);

                if !inherit_env {
                    cmd.env_clear();
                }
                cmd.envs(env);

                // The host must not outlive the session that spawned it
                cmd.kill_on_drop(true);

                let transport = TokioChildProcess::new(cmd).map_err(|e| {
                    McpError::Transport(format!("Failed to start '{}': {}", command, e))
                })?;

                ().serve(transport)
                    .await
                    .map_err(|e| McpError::Handshake(format!("Initialize failed: {}", e)))?
            }
            McpTransport::Http { url, headers } => {
                let config = StreamableHttpClientTransportConfig::with_uri(url.clone());

                let mut header_map = HeaderMap::new();
                for (key, value) in headers {
                    let header_name = HeaderName::try_from(key.as_str()).map_err(|e| {
                        McpError::Config(format!("Invalid header name '{}': {}", key, e))
                    })?;
                    let header_value = HeaderValue::try_from(value.as_str()).map_err(|e| {
                        McpError::Config(format!("Invalid header value for '{}': {}", key, e))
                    })?;
                    header_map.insert(header_name, header_value);
                }

                let http_client = reqwest::Client::builder()
                    .default_headers(header_map)
                    .build()
                    .map_err(|e| {
                        McpError::Transport(format!("Failed to create HTTP client: {}", e))
                    })?;

                let transport = StreamableHttpClientTransport::with_client(http_client, config);

                ().serve(transport)
                    .await
                    .map_err(|e| http_initialize_error(url, e))?
            }
        };

        tracing::info!(server = %self.name, target = %self.config.target(), "session initialized");
        *service_guard = Some(service);
        Ok(())
    }

    async fn ensure_connected(&self) -> Result<(), McpError> {
        self.connect().await
    }

    /// Identity and protocol version the host reported in the handshake
    pub async fn server_info(&self) -> Result<ServerIdentity, McpError> {
        self.ensure_connected().await?;

        let service_guard = self.service.read().await;
        let service = service_guard
            .as_ref()
            .ok_or_else(|| McpError::Connection("Not connected".to_string()))?;

        let info = service
            .peer_info()
            .ok_or_else(|| McpError::Protocol("Server did not report its identity".to_string()))?;

        let protocol_version = serde_json::to_value(&info.protocol_version)?
            .as_str()
            .unwrap_or_default()
            .to_string();

        Ok(ServerIdentity {
            name: info.server_info.name.clone(),
            version: info.server_info.version.clone(),
            protocol_version,
            instructions: info.instructions.clone(),
        })
    }

    /// List the tools the host has registered.
    ///
    /// The result also refreshes the registry used to validate `call_tool`.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpError> {
        self.ensure_connected().await?;

        let service_guard = self.service.read().await;
        let service = service_guard
            .as_ref()
            .ok_or_else(|| McpError::Connection("Not connected".to_string()))?;

        let result = service
            .list_tools(Default::default())
            .await
            .map_err(|e| McpError::Protocol(format!("Failed to list tools: {}", e)))?;

        let descriptors: Vec<ToolDescriptor> = result
            .tools
            .into_iter()
            .map(|tool| {
                ToolDescriptor::from_schema(
                    tool.name.to_string(),
                    tool.description.unwrap_or_default().to_string(),
                    Value::Object((*tool.input_schema).clone()),
                )
            })
            .collect();

        *self.tools.write().await = Some(descriptors.clone());
        Ok(descriptors)
    }

    /// Invoke a tool by name.
    ///
    /// Names missing from the host's registry and arguments missing a required
    /// parameter are rejected before anything is sent. A tool that runs and fails
    /// yields `Ok(ToolOutput { is_error: true, .. })`; the session stays usable.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolOutput, McpError> {
        self.ensure_connected().await?;

        let descriptor = self.descriptor(name).await?;

        let arguments = match arguments {
            Value::Null => serde_json::Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(McpError::InvalidArguments {
                    tool: name.to_string(),
                    message: format!("arguments must be a JSON object, got {}", other),
                })
            }
        };

        let missing = descriptor.missing_required(&Value::Object(arguments.clone()));
        if !missing.is_empty() {
            return Err(McpError::InvalidArguments {
                tool: name.to_string(),
                message: format!("missing required parameter(s): {}", missing.join(", ")),
            });
        }

        let service_guard = self.service.read().await;
        let service = service_guard
            .as_ref()
            .ok_or_else(|| McpError::Connection("Not connected".to_string()))?;

        let params = CallToolRequestParam {
            name: name.to_string().into(),
            arguments: Some(arguments),
        };

        tracing::debug!(server = %self.name, tool = name, "calling tool");

        let result = service.call_tool(params).await.map_err(|e| match e {
            ServiceError::McpError(err) => McpError::ToolExecution(err.message.to_string()),
            other => McpError::Transport(format!("Tool call '{}' failed: {}", name, other)),
        })?;

        Ok(ToolOutput::from_result(name, result))
    }

    /// Find a tool in the cached registry, fetching it from the host on first use
    async fn descriptor(&self, name: &str) -> Result<ToolDescriptor, McpError> {
        let cached = self.tools.read().await.clone();
        let tools = match cached {
            Some(tools) => tools,
            None => self.list_tools().await?,
        };

        tools
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| McpError::UnknownTool(name.to_string()))
    }

    /// Close the session.
    ///
    /// For the pipe transport this terminates the host process. The client can be
    /// reconnected afterwards by calling `connect()` again.
    pub async fn disconnect(&self) -> Result<(), McpError> {
        let mut service_guard = self.service.write().await;
        self.tools.write().await.take();

        if let Some(service) = service_guard.take() {
            service
                .cancel()
                .await
                .map_err(|e| McpError::Connection(format!("Failed to disconnect: {}", e)))?;
            tracing::info!(server = %self.name, "session closed");
        }

        Ok(())
    }

    #[cfg(test)]
    async fn is_connected(&self) -> bool {
        self.service.read().await.is_some()
    }
}

/// The initialize POST itself failing means the host was never reached. Any
/// other failure came back from something that answered.
fn http_initialize_error(url: &str, error: ClientInitializeError) -> McpError {
    match error {
        ClientInitializeError::TransportError { .. } => {
            McpError::Connection(format!("Failed to connect to {}: {}", url, error))
        }
        other => McpError::Handshake(format!("Initialize with {} failed: {}", url, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn stdio_config(command: &str) -> McpServerConfig {
        McpServerConfig::new("test", McpTransport::stdio(command))
    }

    #[tokio::test]
    async fn test_client_is_lazy() {
        let client = McpClient::new(stdio_config("echo"));
        assert_eq!(client.name(), "test");
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_transport_error() {
        let client = McpClient::new(stdio_config("/nonexistent/aws-mcp-server"));

        let err = client.list_tools().await.unwrap_err();
        assert!(
            matches!(err, McpError::Transport(_)),
            "Expected Transport error, got {:?}",
            err
        );
        assert!(!err.is_invocation_error());
    }

    #[tokio::test]
    async fn test_call_tool_without_host_is_not_invocation_error() {
        let client = McpClient::new(stdio_config("/nonexistent/aws-mcp-server"));
        let err = client
            .call_tool("list_s3_buckets", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(!err.is_invocation_error(), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_child_that_is_not_a_host_fails_handshake() {
        // `true` exits immediately without speaking the protocol
        let client = McpClient::new(stdio_config("true"));
        let err = client.connect().await.unwrap_err();
        assert!(matches!(err, McpError::Handshake(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_unreachable_http_host_is_connection_error() {
        // Port 9 (discard) on localhost is typically closed
        let config = McpServerConfig::new("remote", McpTransport::http("http://127.0.0.1:9/mcp"));
        let client = McpClient::new(config);

        let err = client.connect().await.unwrap_err();
        assert!(matches!(err, McpError::Connection(_)), "got {:?}", err);
    }

    #[test]
    fn test_http_initialize_failures_after_reaching_host_are_handshake_errors() {
        let err = http_initialize_error(
            "http://h/mcp",
            ClientInitializeError::ExpectedInitResponse(None),
        );
        assert!(matches!(err, McpError::Handshake(_)), "got {:?}", err);

        let err = http_initialize_error(
            "http://h/mcp",
            ClientInitializeError::ConnectionClosed("initialize response".into()),
        );
        assert!(matches!(err, McpError::Handshake(ref m) if m.contains("http://h/mcp")));
    }

    #[tokio::test]
    async fn test_invalid_header_name_is_config_error() {
        let mut headers = HashMap::new();
        headers.insert("Bad Header".to_string(), "value".to_string());

        let config = McpServerConfig::new(
            "remote",
            McpTransport::Http {
                url: "http://127.0.0.1:9/mcp".to_string(),
                headers,
            },
        );
        let err = McpClient::new(config).connect().await.unwrap_err();
        assert!(matches!(err, McpError::Config(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_invalid_header_value_is_config_error() {
        let config = McpServerConfig::new(
            "remote",
            McpTransport::http("http://127.0.0.1:9/mcp").header("X-Test", "line\nbreak"),
        );
        let err = McpClient::new(config).connect().await.unwrap_err();
        assert!(matches!(err, McpError::Config(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let client = McpClient::new(stdio_config("echo"));
        assert!(client.disconnect().await.is_ok());
        assert!(client.disconnect().await.is_ok());
    }

    #[test]
    fn test_tool_output_into_result() {
        let ok = ToolOutput {
            tool: "list_s3_buckets".into(),
            text: "S3 Buckets (0 total):".into(),
            is_error: false,
        };
        assert_eq!(ok.into_result().unwrap(), "S3 Buckets (0 total):");

        let failed = ToolOutput {
            tool: "get_s3_object".into(),
            text: "Error: NoSuchKey".into(),
            is_error: true,
        };
        let err = failed.into_result().unwrap_err();
        assert!(matches!(err, McpError::ToolFailed { ref tool, .. } if tool == "get_s3_object"));
        assert!(err.is_invocation_error());
    }
}
