use super::{ToolDefinition, file_position_schema};
use crate::backend::BackendRequest;
use lsbridge_core::types::FilePosition;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "find_definition".into(),
        description: "Get the definition of a symbol at a specific position in a file".into(),
        input_schema: json!({
            "type": "object",
            "required": ["position"],
            "properties": {
                "position": file_position_schema(),
                "include_raw_response": {
                    "type": "boolean",
                    "description": "Whether to include the raw response from the langserver in the response. Defaults to false.",
                    "example": false
                },
                "include_source_code": {
                    "type": "boolean",
                    "description": "Whether to include the source code around the symbol's identifier in the response. Defaults to false.",
                    "example": false
                }
            }
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindDefinitionArgs {
    pub position: FilePosition,
    #[serde(default)]
    pub include_raw_response: bool,
    #[serde(default)]
    pub include_source_code: bool,
}

impl FindDefinitionArgs {
    pub fn backend_request(&self, endpoint: &str) -> BackendRequest {
        BackendRequest::post(
            endpoint,
            json!({
                "position": self.position,
                "include_raw_response": self.include_raw_response,
                "include_source_code": self.include_source_code,
            }),
        )
    }
}
