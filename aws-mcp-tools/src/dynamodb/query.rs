use aws_sdk_dynamodb::types::AttributeValue;

use super::item::item_to_json;
use crate::aws::sdk_error;
use crate::prelude::*;

/// Input for a single-item DynamoDB lookup
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryDynamoDbInput {
    /// The name of the DynamoDB table
    pub table_name: String,

    /// The partition key attribute name
    pub key: String,

    /// The partition key value (string typed)
    pub value: String,
}

/// Looks up one item by its string partition key with `GetItem`
pub struct QueryDynamoDbTool {
    client: aws_sdk_dynamodb::Client,
}

impl QueryDynamoDbTool {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

impl Tool for QueryDynamoDbTool {
    type Input = QueryDynamoDbInput;

    fn name(&self) -> &str {
        "query_dynamodb"
    }

    fn description(&self) -> &str {
        "Query a DynamoDB table"
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        for (field, value) in [
            ("table_name", &input.table_name),
            ("key", &input.key),
            ("value", &input.value),
        ] {
            if value.is_empty() {
                return Err(ToolError::InvalidInput(format!("{} must not be empty", field)));
            }
        }

        let output = self
            .client
            .get_item()
            .table_name(&input.table_name)
            .key(&input.key, AttributeValue::S(input.value.clone()))
            .send()
            .await
            .map_err(|e| sdk_error("DynamoDB GetItem failed", e))?;

        match output.item() {
            Some(item) if !item.is_empty() => {
                tracing::debug!(table = %input.table_name, "DynamoDB item found");
                Ok(ToolResult::Json(item_to_json(item)))
            }
            _ => Ok(ToolResult::text(format!(
                "No item found in table '{}' where {} = '{}'",
                input.table_name, input.key, input.value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{clients_without_credentials, mock_clients};
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GET_ITEM_TARGET: &str = "DynamoDB_20120810.GetItem";

    fn input(table: &str, key: &str, value: &str) -> QueryDynamoDbInput {
        QueryDynamoDbInput {
            table_name: table.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn json_response(status: u16, body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(status)
            .insert_header("content-type", "application/x-amz-json-1.0")
            .set_body_string(body.to_string())
    }

    #[tokio::test]
    async fn test_found_item_is_plain_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", GET_ITEM_TARGET))
            .and(body_partial_json(serde_json::json!({
                "TableName": "users",
                "Key": {"userId": {"S": "u-1"}}
            })))
            .respond_with(json_response(
                200,
                serde_json::json!({
                    "Item": {
                        "userId": {"S": "u-1"},
                        "name": {"S": "Ada"},
                        "visits": {"N": "3"},
                        "active": {"BOOL": true}
                    }
                }),
            ))
            .mount(&server)
            .await;

        let clients = mock_clients(&server.uri()).await;
        let tool = QueryDynamoDbTool::new(clients.dynamodb().clone());

        let result = tool.execute(input("users", "userId", "u-1")).await.unwrap();
        assert_eq!(
            result.as_text(),
            r#"{"active":true,"name":"Ada","userId":"u-1","visits":3}"#
        );
    }

    #[tokio::test]
    async fn test_missing_item_is_success_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", GET_ITEM_TARGET))
            .respond_with(json_response(200, serde_json::json!({})))
            .mount(&server)
            .await;

        let clients = mock_clients(&server.uri()).await;
        let tool = QueryDynamoDbTool::new(clients.dynamodb().clone());

        let result = tool.execute(input("users", "userId", "nobody")).await.unwrap();
        assert_eq!(
            result.as_text(),
            "No item found in table 'users' where userId = 'nobody'"
        );
    }

    #[tokio::test]
    async fn test_missing_table_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", GET_ITEM_TARGET))
            .respond_with(json_response(
                400,
                serde_json::json!({
                    "__type": "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException",
                    "message": "Requested resource not found"
                }),
            ))
            .mount(&server)
            .await;

        let clients = mock_clients(&server.uri()).await;
        let tool = QueryDynamoDbTool::new(clients.dynamodb().clone());

        let err = tool.execute(input("ghost", "id", "1")).await.unwrap_err();
        assert!(matches!(err, ToolError::Aws(_)));
        assert!(err.to_string().contains("ResourceNotFound"), "got: {}", err);
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let clients = mock_clients("http://127.0.0.1:9").await;
        let tool = QueryDynamoDbTool::new(clients.dynamodb().clone());

        let err = tool.execute(input("", "id", "1")).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("table_name"));
    }

    #[tokio::test]
    async fn test_missing_credentials_is_error() {
        let clients = clients_without_credentials("http://127.0.0.1:9").await;
        let tool = QueryDynamoDbTool::new(clients.dynamodb().clone());

        let err = tool.execute(input("users", "userId", "u-1")).await.unwrap_err();
        assert!(err.to_string().to_lowercase().contains("credential"), "got: {}", err);
    }
}
