use crate::aws::sdk_error;
use crate::prelude::*;

/// Input for fetching an S3 object
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetS3ObjectInput {
    /// Name of the bucket holding the object
    pub bucket: String,

    /// Object key within the bucket
    pub key: String,
}

/// Fetches one S3 object and returns its body as UTF-8 text.
///
/// The whole body is returned; nothing is truncated. Bodies that are not valid
/// UTF-8 fail with a decode error instead of being lossily converted.
pub struct GetS3ObjectTool {
    client: aws_sdk_s3::Client,
}

impl GetS3ObjectTool {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl Tool for GetS3ObjectTool {
    type Input = GetS3ObjectInput;

    fn name(&self) -> &str {
        "get_s3_object"
    }

    fn description(&self) -> &str {
        "Get an object from S3 bucket"
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        if input.bucket.is_empty() {
            return Err(ToolError::InvalidInput("bucket must not be empty".into()));
        }
        if input.key.is_empty() {
            return Err(ToolError::InvalidInput("key must not be empty".into()));
        }

        let output = self
            .client
            .get_object()
            .bucket(&input.bucket)
            .key(&input.key)
            .send()
            .await
            .map_err(|e| {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    ToolError::Aws(format!(
                        "Object '{}' not found in bucket '{}'",
                        input.key, input.bucket
                    ))
                } else {
                    sdk_error("S3 GetObject failed", e)
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| ToolError::Aws(format!("Failed to read object body: {}", e)))?
            .into_bytes();

        tracing::debug!(
            bucket = %input.bucket,
            key = %input.key,
            size = bytes.len(),
            "fetched S3 object"
        );

        decode_utf8(bytes.to_vec(), &input.key).map(ToolResult::Text)
    }
}

fn decode_utf8(bytes: Vec<u8>, key: &str) -> Result<String, ToolError> {
    String::from_utf8(bytes).map_err(|e| {
        ToolError::Decode(format!(
            "Object '{}' is not valid UTF-8 (invalid byte at offset {})",
            key,
            e.utf8_error().valid_up_to()
        ))
    })
}
