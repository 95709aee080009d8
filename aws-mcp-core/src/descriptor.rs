//! Tool descriptors shared by the Tool Host and the Session Client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single named parameter from a tool's input schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    /// JSON Schema type name ("string", "integer", ...), or "any" when the schema
    /// does not pin one down.
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
}

/// Name, description and parameter schema of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterSpec>,
    /// The full JSON Schema the tool advertises
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Build a descriptor, deriving the parameter list from `input_schema`.
    pub fn from_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        let parameters = parameters_from_schema(&input_schema);
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            input_schema,
        }
    }

    /// Look up a parameter by name
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of required parameters that are absent from `arguments`.
    ///
    /// Returns every required parameter when `arguments` is not an object.
    pub fn missing_required(&self, arguments: &Value) -> Vec<&str> {
        let provided = arguments.as_object();
        self.parameters
            .iter()
            .filter(|p| p.required)
            .filter(|p| !provided.is_some_and(|obj| obj.contains_key(&p.name)))
            .map(|p| p.name.as_str())
            .collect()
    }
}

fn parameters_from_schema(schema: &Value) -> Vec<ParameterSpec> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    properties
        .iter()
        .map(|(name, property)| ParameterSpec {
            name: name.clone(),
            param_type: type_name(property),
            required: required.contains(&name.as_str()),
        })
        .collect()
}

fn type_name(property: &Value) -> String {
    match property.get("type") {
        Some(Value::String(t)) => t.clone(),
        // Optional fields come out as ["string", "null"]
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("null")
            .to_string(),
        _ => "any".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "table_name": {"type": "string"},
                "key": {"type": "string"},
                "value": {"type": "string"},
                "limit": {"type": ["integer", "null"]}
            },
            "required": ["table_name", "key", "value"]
        })
    }

    #[test]
    fn test_parameters_keep_declaration_order() {
        let desc = ToolDescriptor::from_schema("query_dynamodb", "Query", query_schema());
        let names: Vec<&str> = desc.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["table_name", "key", "value", "limit"]);
    }

    #[test]
    fn test_nullable_type_reports_inner_type() {
        let desc = ToolDescriptor::from_schema("query_dynamodb", "Query", query_schema());
        let limit = desc.parameter("limit").unwrap();
        assert_eq!(limit.param_type, "integer");
        assert!(!limit.required);
    }

    #[test]
    fn test_schema_without_properties_has_no_parameters() {
        let desc = ToolDescriptor::from_schema("list_s3_buckets", "List", json!({"type": "object"}));
        assert!(desc.parameters.is_empty());
        assert!(desc.missing_required(&json!({})).is_empty());
    }

    #[test]
    fn test_missing_required() {
        let desc = ToolDescriptor::from_schema("query_dynamodb", "Query", query_schema());

        assert_eq!(
            desc.missing_required(&json!({"table_name": "users"})),
            vec!["key", "value"]
        );
        assert!(desc
            .missing_required(&json!({"table_name": "t", "key": "id", "value": "1"}))
            .is_empty());
        assert_eq!(desc.missing_required(&json!("nope")).len(), 3);
    }

    #[test]
    fn test_untyped_property_is_any() {
        let desc = ToolDescriptor::from_schema(
            "t",
            "",
            json!({"properties": {"blob": {"$ref": "#/$defs/Blob"}}}),
        );
        assert_eq!(desc.parameters[0].param_type, "any");
    }
}
