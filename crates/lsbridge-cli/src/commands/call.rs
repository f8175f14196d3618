use anyhow::{Context, Result};
use lsbridge_core::config::Config;
use lsbridge_mcp::server::Dispatcher;
use serde_json::Value;
use std::sync::Arc;

/// Run a single tool invocation and print each content block.
/// Returns `true` when the result is an error.
pub fn run(config: Arc<Config>, tool: &str, args: Option<&str>) -> Result<bool> {
    let arguments: Value = match args {
        Some(raw) => serde_json::from_str(raw).context("--args must be valid JSON")?,
        None => Value::Object(Default::default()),
    };

    tracing::debug!(tool, "one-shot tool call");
    let dispatcher = Dispatcher::from_config(config).context("Failed to set up backend client")?;
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let result = rt.block_on(dispatcher.call_tool(tool, &arguments));

    for block in &result.content {
        println!("{}", block.text);
    }
    Ok(result.is_error())
}
