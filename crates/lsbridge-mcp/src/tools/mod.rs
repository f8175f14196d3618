pub mod definitions_in_file;
pub mod find_definition;
pub mod find_references;
pub mod list_files;
pub mod read_source_code;

use crate::backend::BackendRequest;
use lsbridge_core::error::{McpError, ValidationError};
use lsbridge_core::types::ToolKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashSet;

/// MCP tool definition for tools/list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Names listed in the schema's top-level `required` array.
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Schema of one top-level property, if declared.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.input_schema.get("properties")?.get(name)
    }
}

/// Return all tool definitions.
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        definitions_in_file::definition(),
        find_definition::definition(),
        find_references::definition(),
        list_files::definition(),
        read_source_code::definition(),
    ]
}

/// Immutable catalog of tool descriptors, built once at startup.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn builtin() -> Self {
        Self {
            tools: list_tools(),
        }
    }

    /// Build a registry from explicit definitions, rejecting duplicate names.
    pub fn new(tools: Vec<ToolDefinition>) -> Result<Self, McpError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(McpError::DuplicateTool {
                    name: tool.name.clone(),
                });
            }
        }
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn get(&self, kind: ToolKind) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == kind.as_str())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A validated invocation, one variant per tool, each with typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    DefinitionsInFile(definitions_in_file::DefinitionsInFileArgs),
    FindDefinition(find_definition::FindDefinitionArgs),
    FindReferences(find_references::FindReferencesArgs),
    ListFiles(list_files::ListFilesArgs),
    ReadSourceCode(read_source_code::ReadSourceCodeArgs),
}

impl ToolCall {
    /// Decode raw arguments into the typed structure for `kind`.
    pub fn decode(kind: ToolKind, arguments: &Value) -> Result<Self, ValidationError> {
        Ok(match kind {
            ToolKind::DefinitionsInFile => Self::DefinitionsInFile(decode_args(arguments)?),
            ToolKind::FindDefinition => Self::FindDefinition(decode_args(arguments)?),
            ToolKind::FindReferences => Self::FindReferences(decode_args(arguments)?),
            ToolKind::ListFiles => Self::ListFiles(decode_args(arguments)?),
            ToolKind::ReadSourceCode => Self::ReadSourceCode(decode_args(arguments)?),
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::DefinitionsInFile(_) => ToolKind::DefinitionsInFile,
            Self::FindDefinition(_) => ToolKind::FindDefinition,
            Self::FindReferences(_) => ToolKind::FindReferences,
            Self::ListFiles(_) => ToolKind::ListFiles,
            Self::ReadSourceCode(_) => ToolKind::ReadSourceCode,
        }
    }

    /// The backend request this call maps to, against `endpoint`.
    pub fn backend_request(&self, endpoint: &str) -> BackendRequest {
        match self {
            Self::DefinitionsInFile(args) => args.backend_request(endpoint),
            Self::FindDefinition(args) => args.backend_request(endpoint),
            Self::FindReferences(args) => args.backend_request(endpoint),
            Self::ListFiles(args) => args.backend_request(endpoint),
            Self::ReadSourceCode(args) => args.backend_request(endpoint),
        }
    }
}

fn decode_args<T: DeserializeOwned>(arguments: &Value) -> Result<T, ValidationError> {
    T::deserialize(arguments).map_err(|e| ValidationError::Malformed(e.to_string()))
}

/// Schema for a zero-indexed `{line, character}` pair.
pub(crate) fn position_schema(description: Option<&str>) -> Value {
    let mut schema = json!({
        "type": "object",
        "required": ["line", "character"],
        "properties": {
            "line": {
                "type": "integer",
                "format": "int32",
                "description": "0-indexed line number",
                "minimum": 0,
                "example": 10
            },
            "character": {
                "type": "integer",
                "format": "int32",
                "description": "0-indexed character index",
                "minimum": 0,
                "example": 5
            }
        }
    });
    if let Some(text) = description {
        schema["description"] = json!(text);
    }
    schema
}

/// Schema for a `{path, position}` identifier location.
pub(crate) fn file_position_schema() -> Value {
    json!({
        "type": "object",
        "required": ["path", "position"],
        "properties": {
            "path": {
                "type": "string",
                "example": "src/main.py"
            },
            "position": position_schema(None)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_matches_tool_kinds_in_order() {
        let registry = ToolRegistry::builtin();
        let names: Vec<&str> = registry.tools().iter().map(|t| t.name.as_str()).collect();
        let expected: Vec<&str> = ToolKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, expected);
        for kind in ToolKind::ALL {
            assert!(registry.get(kind).is_some(), "missing {kind}");
        }
    }

    #[test]
    fn builtin_definitions_have_distinct_names() {
        let tools = list_tools();
        let registry = ToolRegistry::new(tools.clone()).unwrap();
        assert_eq!(registry.tools().len(), 5);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut tools = list_tools();
        tools.push(list_files::definition());
        let err = ToolRegistry::new(tools).unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool { ref name } if name == "list_files"));
    }

    #[test]
    fn required_fields_follow_the_catalog() {
        let registry = ToolRegistry::builtin();
        let required = |kind| registry.get(kind).unwrap().required_fields();
        assert_eq!(required(ToolKind::DefinitionsInFile), vec!["file_path"]);
        assert_eq!(required(ToolKind::FindDefinition), vec!["position"]);
        assert_eq!(
            required(ToolKind::FindReferences),
            vec!["identifier_position"]
        );
        assert!(required(ToolKind::ListFiles).is_empty());
        assert_eq!(
            required(ToolKind::ReadSourceCode),
            vec!["path", "start", "end"]
        );
    }

    #[test]
    fn optional_fields_are_declared_as_properties() {
        let registry = ToolRegistry::builtin();
        let def = registry.get(ToolKind::FindDefinition).unwrap();
        assert!(def.property("include_raw_response").is_some());
        assert!(def.property("include_source_code").is_some());

        let refs = registry.get(ToolKind::FindReferences).unwrap();
        assert_eq!(
            refs.property("include_code_context_lines").unwrap()["type"],
            json!(["integer", "null"])
        );
        assert!(refs.property("include_raw_response").is_some());

        let list = registry.get(ToolKind::ListFiles).unwrap();
        assert_eq!(list.property("glob").unwrap()["type"], json!("string"));
    }

    #[test]
    fn definitions_serialize_with_input_schema_key() {
        let value = serde_json::to_value(list_files::definition()).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }
}
