//! Command line arguments and target selection.

use std::path::PathBuf;

use aws_mcp_core::mcp::{find_server, load_config_file, McpServerConfig, McpTransport};
use clap::Parser;
use serde_json::Value;

use crate::error::ClientResult;
use crate::walkthrough::Walkthrough;

/// Host used when no target is given
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/mcp";

/// Connect to an aws-mcp Tool Host and exercise its tools.
///
/// The target is taken from `--config/--server`, then `--command` or `--url`
/// (default http://localhost:8000/mcp). `--command` and `--url` cannot be combined.
#[derive(Parser, Debug, Clone)]
#[command(name = "aws-mcp-client", version, about)]
pub struct ClientArgs {
    /// Streamable HTTP endpoint of a running host.
    #[arg(long, env = "MCP_SERVER_URL", conflicts_with = "command")]
    pub url: Option<String>,

    /// Spawn this host command and talk to it over stdin/stdout.
    #[arg(long, env = "MCP_SERVER_COMMAND")]
    pub command: Option<String>,

    /// Argument for --command (repeatable).
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub command_args: Vec<String>,

    /// JSON file with an `mcpServers` table.
    #[arg(long, requires = "server")]
    pub config: Option<PathBuf>,

    /// Entry to use from --config.
    #[arg(long, requires = "config")]
    pub server: Option<String>,

    /// Environment variable for a spawned host, as KEY=VALUE (repeatable).
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Start a spawned host with only the --env variables.
    #[arg(long)]
    pub no_inherit_env: bool,

    /// HTTP header for --url, as NAME:VALUE (repeatable).
    #[arg(long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Call one tool and print its output instead of running the walkthrough.
    #[arg(long, value_name = "TOOL")]
    pub call: Option<String>,

    /// JSON object of arguments for --call.
    #[arg(long = "args", value_name = "JSON", requires = "call", value_parser = parse_json_object)]
    pub call_args: Option<Value>,

    /// Bucket for the get_s3_object step (walkthrough).
    #[arg(long, requires = "key")]
    pub bucket: Option<String>,

    /// Object key for the get_s3_object step (walkthrough).
    #[arg(long, requires = "bucket")]
    pub key: Option<String>,

    /// Table for the query_dynamodb step (walkthrough).
    #[arg(long, requires_all = ["key_name", "key_value"])]
    pub table: Option<String>,

    /// Partition key attribute for the query_dynamodb step.
    #[arg(long, requires = "table")]
    pub key_name: Option<String>,

    /// Partition key value for the query_dynamodb step.
    #[arg(long, requires = "table")]
    pub key_value: Option<String>,
}

impl ClientArgs {
    /// Resolve the session target.
    ///
    /// `--env`, `--no-inherit-env` and `--header` are applied on top of whatever the
    /// target came from.
    pub async fn server_config(&self) -> ClientResult<McpServerConfig> {
        let mut config = match (&self.config, &self.server, &self.command) {
            (Some(path), Some(name), _) => {
                let servers = load_config_file(path).await?;
                find_server(servers, name)?
            }
            (_, _, Some(command)) => McpServerConfig::new(
                "command",
                McpTransport::stdio(command).args(self.command_args.iter().cloned()),
            ),
            _ => McpServerConfig::new(
                "url",
                McpTransport::http(self.url.as_deref().unwrap_or(DEFAULT_SERVER_URL)),
            ),
        };

        match &mut config.transport {
            McpTransport::Stdio {
                env, inherit_env, ..
            } => {
                env.extend(self.env.iter().cloned());
                if self.no_inherit_env {
                    *inherit_env = false;
                }
            }
            McpTransport::Http { headers, .. } => {
                headers.extend(self.headers.iter().cloned());
            }
        }

        Ok(config)
    }

    /// Walkthrough steps enabled by the `--bucket`/`--table` flags
    pub fn walkthrough(&self) -> Walkthrough {
        Walkthrough {
            object: self
                .object_target()
                .map(|(b, k)| (b.to_string(), k.to_string())),
            item: self
                .item_target()
                .map(|(t, k, v)| (t.to_string(), k.to_string(), v.to_string())),
        }
    }

    /// The walkthrough's S3 object step, if requested
    pub fn object_target(&self) -> Option<(&str, &str)> {
        Some((self.bucket.as_deref()?, self.key.as_deref()?))
    }

    /// The walkthrough's DynamoDB step, if requested
    pub fn item_target(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.table.as_deref()?,
            self.key_name.as_deref()?,
            self.key_value.as_deref()?,
        ))
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty variable name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{}'", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_json_object(raw: &str) -> Result<Value, String> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(Value::Object(map)),
        Ok(other) => Err(format!("expected a JSON object, got {}", other)),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ClientArgs {
        let mut argv = vec!["aws-mcp-client"];
        argv.extend_from_slice(args);
        ClientArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("AWS_PROFILE=demo").unwrap(),
            ("AWS_PROFILE".to_string(), "demo".to_string())
        );
        assert_eq!(
            parse_key_value("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
        assert_eq!(parse_key_value("A=b=c").unwrap().1, "b=c");
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Authorization: Bearer abc").unwrap(),
            ("Authorization".to_string(), "Bearer abc".to_string())
        );
        assert!(parse_header("nocolon").is_err());
    }

    #[test]
    fn test_call_args_must_be_object() {
        assert!(parse_json_object(r#"{"bucket":"b"}"#).is_ok());
        assert!(parse_json_object("[1]").is_err());
        assert!(parse_json_object("{").is_err());
    }

    #[tokio::test]
    async fn test_command_target_with_env() {
        let args = parse(&[
            "--command",
            "aws-mcp-server",
            "--arg",
            "--transport",
            "--arg",
            "stdio",
            "--env",
            "AWS_PROFILE=demo",
            "--no-inherit-env",
        ]);

        let config = args.server_config().await.unwrap();
        match config.transport {
            McpTransport::Stdio {
                command,
                args,
                env,
                inherit_env,
            } => {
                assert_eq!(command, "aws-mcp-server");
                assert_eq!(args, vec!["--transport", "stdio"]);
                assert_eq!(env.get("AWS_PROFILE").map(String::as_str), Some("demo"));
                assert!(!inherit_env);
            }
            other => panic!("expected stdio, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_url_target_with_headers() {
        let args = parse(&["--url", "http://10.0.0.5:9000/mcp", "--header", "x-team: data"]);

        let config = args.server_config().await.unwrap();
        match config.transport {
            McpTransport::Http { url, headers } => {
                assert_eq!(url, "http://10.0.0.5:9000/mcp");
                assert_eq!(headers.get("x-team").map(String::as_str), Some("data"));
            }
            other => panic!("expected http, got {:?}", other),
        }
    }

    #[test]
    fn test_url_and_command_are_exclusive() {
        let err = ClientArgs::try_parse_from([
            "aws-mcp-client",
            "--url",
            "http://localhost:8000/mcp",
            "--command",
            "aws-mcp-server",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_server_requires_config() {
        assert!(ClientArgs::try_parse_from(["aws-mcp-client", "--server", "aws"]).is_err());
    }

    #[test]
    fn test_walkthrough_targets() {
        let args = parse(&[
            "--bucket",
            "b",
            "--key",
            "k",
            "--table",
            "t",
            "--key-name",
            "id",
            "--key-value",
            "1",
        ]);
        assert_eq!(args.object_target(), Some(("b", "k")));
        assert_eq!(args.item_target(), Some(("t", "id", "1")));

        assert!(ClientArgs::try_parse_from(["aws-mcp-client", "--bucket", "b"]).is_err());
        assert!(ClientArgs::try_parse_from(["aws-mcp-client", "--table", "t"]).is_err());
    }
}
