use anyhow::{Context, Result};
use lsbridge_core::config::Config;
use std::sync::Arc;

/// Start the MCP server on stdin/stdout.
pub fn run(config: Arc<Config>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(lsbridge_mcp::server::run_server(config))
        .map_err(|e| anyhow::anyhow!("MCP server error: {}", e))
}

/// Start the MCP server in HTTP transport mode.
pub fn run_http(config: Arc<Config>, bind_addr: &str, port: u16) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(lsbridge_mcp::http::run_http_server(config, bind_addr, port))
        .map_err(|e| anyhow::anyhow!("MCP HTTP server error: {}", e))
}
