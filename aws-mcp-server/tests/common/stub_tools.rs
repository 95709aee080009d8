//! Stub tools with no cloud dependency, used by the stub host binary and the
//! transport tests.

use aws_mcp_core::{Tool, ToolError, ToolRegistry, ToolResult};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Deserialize, JsonSchema)]
pub struct EchoInput {
    /// Text to send back
    pub message: String,
}

pub struct EchoTool;

impl Tool for EchoTool {
    type Input = EchoInput;

    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo back the input"
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        Ok(input.message.into())
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct EnvVarInput {
    /// Variable to read from the host's environment
    pub name: String,
}

/// Reports the value of an environment variable as the host process sees it
pub struct EnvVarTool;

impl Tool for EnvVarTool {
    type Input = EnvVarInput;

    fn name(&self) -> &str {
        "env_var"
    }

    fn description(&self) -> &str {
        "Read an environment variable"
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        std::env::var(&input.name)
            .map(ToolResult::Text)
            .map_err(|_| ToolError::Custom(format!("{} is not set", input.name)))
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct NoInput {}

/// Reports the host's process id
pub struct PidTool;

impl Tool for PidTool {
    type Input = NoInput;

    fn name(&self) -> &str {
        "pid"
    }

    fn description(&self) -> &str {
        "Report the host process id"
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        Ok(std::process::id().to_string().into())
    }
}

pub struct FailTool;

impl Tool for FailTool {
    type Input = NoInput;

    fn name(&self) -> &str {
        "fail"
    }

    fn description(&self) -> &str {
        "A tool that always fails"
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        Err(ToolError::Aws("simulated outage".into()))
    }
}

pub fn stub_registry() -> ToolRegistry {
    ToolRegistry::from_tools(aws_mcp_core::box_tools![EchoTool, EnvVarTool, PidTool, FailTool])
        .expect("stub tool names are unique")
}
