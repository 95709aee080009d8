use super::{McpError, McpServerConfig, McpTransport};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Server definitions file in the common `mcpServers` layout
#[derive(Debug, Deserialize)]
pub struct McpConfigFile {
    /// Map of server name to server configuration
    #[serde(rename = "mcpServers")]
    pub mcp_servers: BTreeMap<String, McpServerEntry>,
}

/// Individual server configuration entry
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerEntry {
    /// Transport type: "stdio" (default), "http", or "sse" (treated as http)
    #[serde(rename = "type", default)]
    pub server_type: Option<String>,
    /// Command to execute (stdio)
    pub command: Option<String>,
    /// Command-line arguments (stdio)
    pub args: Option<Vec<String>>,
    /// Environment variables for the child (stdio)
    pub env: Option<HashMap<String, String>>,
    /// Copy the client's environment into the child (stdio, default true)
    pub inherit_env: Option<bool>,
    /// Server URL (http)
    pub url: Option<String>,
    /// HTTP headers (http)
    pub headers: Option<HashMap<String, String>>,
}

/// Load server definitions from a JSON file.
///
/// `~` in the path is expanded, and `${VAR}` / `${VAR:-default}` references in
/// string values are replaced from the process environment.
/// Servers are returned sorted by name.
pub async fn load_config_file(path: impl AsRef<Path>) -> Result<Vec<McpServerConfig>, McpError> {
    let path_str = path.as_ref().to_string_lossy();
    let expanded_path = shellexpand::tilde(&path_str);

    let content = tokio::fs::read_to_string(expanded_path.as_ref()).await?;
    tracing::debug!(path = %expanded_path, "loaded MCP config file");

    parse_config(&content)
}

/// Parse server definitions from JSON text, expanding variables in string values
pub fn parse_config(content: &str) -> Result<Vec<McpServerConfig>, McpError> {
    let mut raw: Value = serde_json::from_str(content)?;
    expand_in_value(&mut raw)?;
    let config: McpConfigFile = serde_json::from_value(raw)?;

    config
        .mcp_servers
        .into_iter()
        .map(|(name, entry)| entry_to_config(name, entry))
        .collect()
}

/// Pick one server by name from a loaded config
pub fn find_server(
    servers: Vec<McpServerConfig>,
    name: &str,
) -> Result<McpServerConfig, McpError> {
    let known: Vec<String> = servers.iter().map(|s| s.name.clone()).collect();
    servers
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| {
            McpError::Config(format!(
                "Server '{}' not found in config (available: {})",
                name,
                known.join(", ")
            ))
        })
}

fn entry_to_config(name: String, entry: McpServerEntry) -> Result<McpServerConfig, McpError> {
    let transport = match entry.server_type.as_deref().unwrap_or("stdio") {
        "stdio" => {
            let command = entry
                .command
                .ok_or_else(|| McpError::Config(format!("Server '{}': missing 'command'", name)))?;
            McpTransport::Stdio {
                command,
                args: entry.args.unwrap_or_default(),
                env: entry.env.unwrap_or_default(),
                inherit_env: entry.inherit_env.unwrap_or(true),
            }
        }
        "http" | "sse" => {
            let url = entry
                .url
                .ok_or_else(|| McpError::Config(format!("Server '{}': missing 'url'", name)))?;
            McpTransport::Http {
                url,
                headers: entry.headers.unwrap_or_default(),
            }
        }
        other => {
            return Err(McpError::Config(format!(
                "Server '{}': unknown transport type '{}'",
                name, other
            )))
        }
    };

    Ok(McpServerConfig::new(name, transport))
}

/// Expand every string inside `value`. Object keys are left as written.
fn expand_in_value(value: &mut Value) -> Result<(), McpError> {
    match value {
        Value::String(s) => *s = expand_env_vars(s)?,
        Value::Array(items) => {
            for item in items {
                expand_in_value(item)?;
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                expand_in_value(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Replace `${VAR}` and `${VAR:-default}` with values from the environment.
///
/// Unset variables without a default become empty strings. A bare `$` is left alone.
fn expand_env_vars(input: &str) -> Result<String, McpError> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| {
            McpError::Config(format!(
                "Unterminated variable reference near '{}'",
                rest[start..].chars().take(24).collect::<String>()
            ))
        })?;

        let reference = &after[..end];
        let (var, default) = match reference.split_once(":-") {
            Some((var, default)) => (var, Some(default)),
            None => (reference, None),
        };

        match std::env::var(var) {
            Ok(value) => output.push_str(&value),
            Err(_) => output.push_str(default.unwrap_or("")),
        }

        rest = &after[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}
