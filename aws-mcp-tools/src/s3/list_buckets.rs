use crate::aws::sdk_error;
use crate::prelude::*;

/// Input for [`ListS3BucketsTool`]. Takes no parameters.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListS3BucketsInput {}

/// Lists every bucket visible to the resolved credentials
pub struct ListS3BucketsTool {
    client: aws_sdk_s3::Client,
}

impl ListS3BucketsTool {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl Tool for ListS3BucketsTool {
    type Input = ListS3BucketsInput;

    fn name(&self) -> &str {
        "list_s3_buckets"
    }

    fn description(&self) -> &str {
        "List all S3 buckets"
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| sdk_error("S3 ListBuckets failed", e))?;

        let names: Vec<&str> = output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name())
            .collect();

        tracing::debug!(count = names.len(), "listed S3 buckets");
        Ok(ToolResult::text(format_bucket_list(&names)))
    }
}

fn format_bucket_list(names: &[&str]) -> String {
    let mut out = format!("S3 Buckets ({} total):", names.len());
    for name in names {
        out.push_str("\n  - ");
        out.push_str(name);
    }
    out
}
