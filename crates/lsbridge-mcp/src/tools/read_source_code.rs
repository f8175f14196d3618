use super::{ToolDefinition, position_schema};
use crate::backend::{BackendRequest, ResponseShape};
use lsbridge_core::types::Range;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "read_source_code".into(),
        description: "Read source code from a file in the workspace".into(),
        input_schema: json!({
            "type": "object",
            "required": ["path", "start", "end"],
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path to the file.",
                    "example": "src/main.py"
                },
                "start": position_schema(Some("The start position of the range.")),
                "end": position_schema(Some("The end position of the range."))
            }
        }),
    }
}

/// The requested span; the backend answers with `{"source_code": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadSourceCodeArgs {
    #[serde(flatten)]
    pub range: Range,
}

impl ReadSourceCodeArgs {
    pub fn backend_request(&self, endpoint: &str) -> BackendRequest {
        BackendRequest::post(endpoint, json!(self.range)).with_shape(ResponseShape::SourceText)
    }
}
