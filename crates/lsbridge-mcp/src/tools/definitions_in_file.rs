use super::ToolDefinition;
use crate::backend::BackendRequest;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "definitions_in_file".into(),
        description: "Get all symbol definitions in a file (uses ast-grep)".into(),
        input_schema: json!({
            "type": "object",
            "required": ["file_path"],
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to the file to get the symbols for, relative to the root of the workspace.",
                    "example": "src/main.py"
                }
            }
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionsInFileArgs {
    pub file_path: String,
}

impl DefinitionsInFileArgs {
    pub fn backend_request(&self, endpoint: &str) -> BackendRequest {
        BackendRequest::get(endpoint).with_query("file_path", self.file_path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HttpMethod;

    #[test]
    fn file_path_goes_into_the_query_string() {
        let args = DefinitionsInFileArgs {
            file_path: "src/main.py".into(),
        };
        let request = args.backend_request("/symbol/definitions-in-file");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.query,
            vec![("file_path".to_string(), "src/main.py".to_string())]
        );
        assert!(request.body.is_none());
    }
}
