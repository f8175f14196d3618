//! Turning backend outcomes into MCP content blocks.

use crate::backend::BackendPayload;
use lsbridge_core::error::ToolError;
use lsbridge_core::types::ContentBlock;
use serde_json::{Map, Value};

/// Structured payloads become one pretty-printed JSON block with keys in a
/// stable order; source text is passed through untouched.
pub fn format_success(payload: &BackendPayload) -> Vec<ContentBlock> {
    match payload {
        BackendPayload::SourceText(text) => vec![ContentBlock::text(text.clone())],
        BackendPayload::Json(value) => match serde_json::to_string_pretty(&sorted(value)) {
            Ok(text) => vec![ContentBlock::text(text)],
            Err(e) => format_failure(&ToolError::Formatting(e.to_string())),
        },
    }
}

/// A single error block: `Error [<code>]: <message>`.
pub fn format_failure(error: &ToolError) -> Vec<ContentBlock> {
    vec![ContentBlock::error(format!(
        "Error [{}]: {}",
        error.code().as_str(),
        error
    ))]
}

// Guards against `preserve_order` being enabled on serde_json somewhere in the graph.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (key, inner) in entries {
                out.insert(key.clone(), sorted(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
