use super::{ToolDefinition, file_position_schema};
use crate::backend::BackendRequest;
use lsbridge_core::types::FilePosition;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "find_references".into(),
        description: "Find all references to a symbol".into(),
        input_schema: json!({
            "type": "object",
            "required": ["identifier_position"],
            "properties": {
                "identifier_position": file_position_schema(),
                "include_code_context_lines": {
                    "type": ["integer", "null"],
                    "format": "int32",
                    "description": "Number of source lines around each reference to include in the response. Defaults to none.",
                    "minimum": 0,
                    "example": 5
                },
                "include_raw_response": {
                    "type": "boolean",
                    "description": "Whether to include the raw response from the langserver in the response. Defaults to false.",
                    "example": false
                }
            }
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindReferencesArgs {
    pub identifier_position: FilePosition,
    #[serde(default)]
    pub include_code_context_lines: Option<u32>,
    #[serde(default)]
    pub include_raw_response: bool,
}

impl FindReferencesArgs {
    pub fn backend_request(&self, endpoint: &str) -> BackendRequest {
        BackendRequest::post(
            endpoint,
            json!({
                "identifier_position": self.identifier_position,
                "include_code_context_lines": self.include_code_context_lines,
                "include_raw_response": self.include_raw_response,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_lines_are_forwarded_and_null_when_absent() {
        let position = json!({"path": "graph.py", "position": {"line": 0, "character": 6}});

        let args: FindReferencesArgs = serde_json::from_value(json!({
            "identifier_position": position,
            "include_code_context_lines": 2
        }))
        .unwrap();
        let body = args.backend_request("/symbol/find-references").body.unwrap();
        assert_eq!(body["include_code_context_lines"], json!(2));
        assert_eq!(body["include_raw_response"], json!(false));

        let args: FindReferencesArgs =
            serde_json::from_value(json!({"identifier_position": position})).unwrap();
        let body = args.backend_request("/symbol/find-references").body.unwrap();
        assert_eq!(body["include_code_context_lines"], json!(null));
    }
}
