//! Argument validation against a tool's input schema.
//!
//! Only the top level is checked against the schema: the object shape, every
//! required field, and the declared type of each present property. Nested
//! structure is enforced by the typed decode in [`ToolCall::decode`].

use crate::tools::{ToolCall, ToolDefinition};
use lsbridge_core::error::ValidationError;
use lsbridge_core::types::ToolKind;
use serde_json::{Map, Value};

/// Check raw arguments against `definition` without decoding them.
pub fn validate_arguments(
    definition: &ToolDefinition,
    arguments: &Value,
) -> Result<(), ValidationError> {
    let empty = Map::new();
    let object = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(ValidationError::NotAnObject {
                found: json_type_name(other),
            });
        }
    };

    let missing: Vec<String> = definition
        .required_fields()
        .into_iter()
        .filter(|field| object.get(*field).is_none_or(Value::is_null))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    for (field, value) in object {
        let Some(expected) = definition.property(field).and_then(|p| p.get("type")) else {
            continue;
        };
        if !matches_declared_type(value, expected) {
            return Err(ValidationError::TypeMismatch {
                field: field.clone(),
                expected: describe_type(expected),
            });
        }
    }
    Ok(())
}

/// Validate and decode in one step. Nothing reaches the backend unless this
/// returns `Ok`.
pub fn validate_call(
    definition: &ToolDefinition,
    kind: ToolKind,
    arguments: &Value,
) -> Result<ToolCall, ValidationError> {
    validate_arguments(definition, arguments)?;
    let normalized = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments.clone()
    };
    ToolCall::decode(kind, &normalized)
}

fn matches_declared_type(value: &Value, expected: &Value) -> bool {
    match expected {
        Value::String(name) => matches_type_name(value, name),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| matches_type_name(value, name)),
        _ => true,
    }
}

fn matches_type_name(value: &Value, name: &str) -> bool {
    match name {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn describe_type(expected: &Value) -> String {
    match expected {
        Value::String(name) => name.clone(),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
