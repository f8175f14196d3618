use lsbridge_core::types::ContentBlock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl JsonRpcRequest {
    /// Requests without an `id` are notifications and never get a response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<serde_json::Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }
}

/// Ordered, non-empty content produced by one `tools/call`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    pub content: Vec<ContentBlock>,
}

impl CallResult {
    pub fn new(content: Vec<ContentBlock>) -> Self {
        Self { content }
    }

    pub fn is_error(&self) -> bool {
        self.content.iter().any(ContentBlock::is_error)
    }

    /// Concatenated text of every block, mostly useful for logging and the CLI.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// MCP wire shape: text content items plus the `isError` flag.
    pub fn to_value(&self) -> Value {
        let content: Vec<Value> = self
            .content
            .iter()
            .map(|block| json!({"type": "text", "text": block.text}))
            .collect();
        json!({
            "content": content,
            "isError": self.is_error(),
        })
    }
}
