use super::ToolDefinition;
use crate::backend::BackendRequest;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_files".into(),
        description: "Get a list of all files in the workspace".into(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "glob": {
                    "type": "string",
                    "description": "Optional glob pattern to filter files",
                    "example": "**/*.py"
                }
            }
        }),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesArgs {
    #[serde(default)]
    pub glob: Option<String>,
}

impl ListFilesArgs {
    pub fn backend_request(&self, endpoint: &str) -> BackendRequest {
        let request = BackendRequest::get(endpoint);
        match &self.glob {
            Some(glob) => request.with_query("glob", glob.as_str()),
            None => request,
        }
    }
}
