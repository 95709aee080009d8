//! S3 tools: bucket listing and single-object reads.

mod get_object;
mod list_buckets;

pub use get_object::{GetS3ObjectInput, GetS3ObjectTool};
pub use list_buckets::{ListS3BucketsInput, ListS3BucketsTool};

use aws_mcp_core::{box_tools, DynTool};

use crate::aws::AwsClients;

/// Both S3 tools, sharing one client
pub fn all_tools(clients: &AwsClients) -> Vec<Box<dyn DynTool>> {
    box_tools![
        ListS3BucketsTool::new(clients.s3().clone()),
        GetS3ObjectTool::new(clients.s3().clone()),
    ]
}
