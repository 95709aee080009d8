//! The tools served by the aws-mcp Tool Host.
//!
//! | Tool | Backing call |
//! |------|--------------|
//! | `list_s3_buckets` | S3 `ListBuckets` |
//! | `get_s3_object` | S3 `GetObject` |
//! | `query_dynamodb` | DynamoDB `GetItem` |
//!
//! All tools share one [`AwsClients`] built from the standard AWS configuration chain.

pub mod aws;
pub mod dynamodb;
pub mod s3;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aws::{AwsClients, AwsClientsBuilder, CallerIdentity, DEFAULT_REGION};

use aws_mcp_core::{DynTool, RegistryError, ToolRegistry};

/// Every tool, in the order the host advertises them
pub fn all_tools(clients: &AwsClients) -> Vec<Box<dyn DynTool>> {
    let mut tools = s3::all_tools(clients);
    tools.extend(dynamodb::all_tools(clients));
    tools
}

/// A registry holding [`all_tools`]
pub fn aws_registry(clients: &AwsClients) -> Result<ToolRegistry, RegistryError> {
    ToolRegistry::from_tools(all_tools(clients))
}

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use aws_mcp_core::{Tool, ToolError, ToolResult};
    pub use schemars::JsonSchema;
    pub use serde::{Deserialize, Serialize};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry_order_and_parameters() {
        let clients = test_utils::mock_clients("http://127.0.0.1:9").await;
        let registry = aws_registry(&clients).unwrap();

        let descriptors = registry.descriptors();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["list_s3_buckets", "get_s3_object", "query_dynamodb"]);

        assert!(descriptors[0].parameters.is_empty());

        let params: Vec<&str> = descriptors[1].parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["bucket", "key"]);
        assert!(descriptors[1].parameters.iter().all(|p| p.required && p.param_type == "string"));

        let params: Vec<&str> = descriptors[2].parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["table_name", "key", "value"]);
    }
}
