use std::collections::HashMap;

/// Which Tool Host a session talks to, and how.
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    /// Server name for identification and logging
    pub name: String,
    /// Transport configuration
    pub transport: McpTransport,
}

impl McpServerConfig {
    /// Create a new server configuration
    ///
    /// # Example
    /// ```
    /// # use aws_mcp_core::mcp::{McpServerConfig, McpTransport};
    /// let local = McpServerConfig::new("aws", McpTransport::stdio("aws-mcp-server"));
    /// let remote = McpServerConfig::new("aws", McpTransport::http("http://localhost:8000/mcp"));
    /// ```
    pub fn new(name: impl Into<String>, transport: impl Into<McpTransport>) -> Self {
        Self {
            name: name.into(),
            transport: transport.into(),
        }
    }

    /// Short human-readable description of the target, for logs and CLI output
    pub fn target(&self) -> String {
        match &self.transport {
            McpTransport::Stdio { command, args, .. } if args.is_empty() => command.clone(),
            McpTransport::Stdio { command, args, .. } => format!("{} {}", command, args.join(" ")),
            McpTransport::Http { url, .. } => url.clone(),
        }
    }
}

/// The two transports a session can run over. Chosen once, before connecting.
#[derive(Debug, Clone)]
pub enum McpTransport {
    /// Spawn the Tool Host as a child process and exchange messages over its
    /// stdin/stdout.
    ///
    /// The session owns the child: it is killed when the session closes.
    Stdio {
        /// Command to execute (e.g., "aws-mcp-server")
        command: String,
        /// Command-line arguments
        args: Vec<String>,
        /// Variables set on the child, applied on top of the inherited environment
        env: HashMap<String, String>,
        /// Start from a copy of this process's environment (true) or from an empty
        /// one (false). AWS credentials only reach the child through this
        /// environment.
        inherit_env: bool,
    },
    /// Connect to an already-running Tool Host using MCP Streamable HTTP.
    ///
    /// The URL normally ends in `/mcp`. Headers are sent with every request.
    Http {
        url: String,
        headers: HashMap<String, String>,
    },
}

impl McpTransport {
    /// Create a stdio transport builder with the given command
    ///
    /// # Example
    /// ```
    /// # use aws_mcp_core::mcp::McpTransport;
    /// let transport = McpTransport::stdio("aws-mcp-server")
    ///     .env("AWS_PROFILE", "demo")
    ///     .env("AWS_DEFAULT_REGION", "eu-west-1");
    /// ```
    pub fn stdio(command: impl Into<String>) -> StdioBuilder {
        StdioBuilder::new(command)
    }

    /// Create an HTTP transport builder with the given URL
    ///
    /// # Example
    /// ```
    /// # use aws_mcp_core::mcp::McpTransport;
    /// let transport = McpTransport::http("http://localhost:8000/mcp")
    ///     .header("X-Request-Source", "aws-mcp-client");
    /// ```
    pub fn http(url: impl Into<String>) -> HttpBuilder {
        HttpBuilder::new(url)
    }

    pub fn is_stdio(&self) -> bool {
        matches!(self, McpTransport::Stdio { .. })
    }
}

/// Builder for stdio transport configuration
#[derive(Debug, Clone)]
pub struct StdioBuilder {
    command: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    inherit_env: bool,
}

impl StdioBuilder {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: HashMap::new(),
            inherit_env: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set (or override) a single environment variable on the child
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Whether the child starts from a copy of the current environment (default: true)
    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    pub fn build(self) -> McpTransport {
        self.into()
    }
}

impl From<StdioBuilder> for McpTransport {
    fn from(builder: StdioBuilder) -> Self {
        McpTransport::Stdio {
            command: builder.command,
            args: builder.args,
            env: builder.env,
            inherit_env: builder.inherit_env,
        }
    }
}

/// Builder for HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpBuilder {
    url: String,
    headers: HashMap<String, String>,
}

impl HttpBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn build(self) -> McpTransport {
        self.into()
    }
}

impl From<HttpBuilder> for McpTransport {
    fn from(builder: HttpBuilder) -> Self {
        McpTransport::Http {
            url: builder.url,
            headers: builder.headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdio_defaults_inherit_environment() {
        let transport = McpTransport::stdio("aws-mcp-server").build();

        match transport {
            McpTransport::Stdio {
                command,
                args,
                env,
                inherit_env,
            } => {
                assert_eq!(command, "aws-mcp-server");
                assert!(args.is_empty());
                assert!(env.is_empty());
                assert!(inherit_env);
            }
            _ => panic!("Expected Stdio transport"),
        }
    }

    #[test]
    fn test_stdio_env_overrides_replace_earlier_values() {
        let transport = McpTransport::stdio("aws-mcp-server")
            .envs([("AWS_PROFILE", "default"), ("AWS_DEFAULT_REGION", "us-east-1")])
            .env("AWS_PROFILE", "demo")
            .inherit_env(false)
            .build();

        let McpTransport::Stdio {
            env, inherit_env, ..
        } = transport
        else {
            panic!("Expected Stdio transport");
        };
        assert_eq!(env.get("AWS_PROFILE").map(String::as_str), Some("demo"));
        assert_eq!(
            env.get("AWS_DEFAULT_REGION").map(String::as_str),
            Some("us-east-1")
        );
        assert!(!inherit_env);
    }

    #[test]
    fn test_stdio_args_accumulate() {
        let transport = McpTransport::stdio("cargo")
            .arg("run")
            .args(["-p", "aws-mcp-server"])
            .build();

        let McpTransport::Stdio { args, .. } = transport else {
            panic!("Expected Stdio transport");
        };
        assert_eq!(args, vec!["run", "-p", "aws-mcp-server"]);
    }

    #[test]
    fn test_http_builder_headers() {
        let transport = McpTransport::http("http://localhost:8000/mcp")
            .header("Authorization", "Bearer abc")
            .headers([("X-Trace", "1")])
            .build();

        let McpTransport::Http { url, headers } = transport else {
            panic!("Expected Http transport");
        };
        assert_eq!(url, "http://localhost:8000/mcp");
        assert_eq!(headers.len(), 2);
        assert!(!McpTransport::Http { url, headers }.is_stdio());
    }

    #[test]
    fn test_config_target_description() {
        let pipe = McpServerConfig::new(
            "aws",
            McpTransport::stdio("cargo").args(["run", "-q"]),
        );
        assert_eq!(pipe.target(), "cargo run -q");

        let bare = McpServerConfig::new("aws", McpTransport::stdio("aws-mcp-server"));
        assert_eq!(bare.target(), "aws-mcp-server");

        let net = McpServerConfig::new("aws", McpTransport::http("http://h:1/mcp"));
        assert_eq!(net.target(), "http://h:1/mcp");
    }
}
