//! DynamoDB tools.

mod item;
mod query;

pub use item::{attribute_to_json, item_to_json};
pub use query::{QueryDynamoDbInput, QueryDynamoDbTool};

use aws_mcp_core::{box_tools, DynTool};

use crate::aws::AwsClients;

pub fn all_tools(clients: &AwsClients) -> Vec<Box<dyn DynTool>> {
    box_tools![QueryDynamoDbTool::new(clients.dynamodb().clone())]
}
