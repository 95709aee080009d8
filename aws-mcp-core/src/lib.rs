//! # aws-mcp-core
//!
//! Building blocks shared by the aws-mcp Tool Host and Session Client.
//!
//! - [`Tool`] / [`DynTool`]: typed tools with JSON schemas derived from their input
//!   types, plus the object-safe form used for dynamic dispatch.
//! - [`ToolRegistry`]: the fixed, ordered set of tools a host serves.
//! - [`ToolDescriptor`]: name, description and ordered parameter list of a tool.
//! - [`mcp`]: the session client, its transport configuration (pipe or HTTP) and
//!   the `mcpServers` JSON config loader.
//!
//! ## Defining a tool
//!
//! ```rust
//! use aws_mcp_core::{Tool, ToolError, ToolRegistry, ToolResult};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct WhoAmIInput {}
//!
//! struct WhoAmI;
//!
//! impl Tool for WhoAmI {
//!     type Input = WhoAmIInput;
//!
//!     fn name(&self) -> &str { "whoami" }
//!     fn description(&self) -> &str { "Report the caller" }
//!
//!     fn execute(&self, _input: Self::Input) -> impl std::future::Future<Output = Result<ToolResult, ToolError>> + Send {
//!         async { Ok("demo-user".into()) }
//!     }
//! }
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(WhoAmI).unwrap();
//! assert_eq!(registry.descriptors()[0].name, "whoami");
//!
//! # tokio_test::block_on(async {
//! let result = registry.call("whoami", serde_json::json!({})).await.unwrap();
//! assert_eq!(result.as_text(), "demo-user");
//! # });
//! ```

pub mod descriptor;
pub mod mcp;
pub mod registry;
pub mod tool;

pub use descriptor::{ParameterSpec, ToolDescriptor};
pub use registry::{RegistryError, ToolRegistry};
pub use tool::{box_tool, DynTool, Tool, ToolError, ToolResult};
