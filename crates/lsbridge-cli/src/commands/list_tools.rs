use anyhow::{Context, Result};

pub fn run() -> Result<()> {
    let tools = lsbridge_mcp::tools::list_tools();
    let rendered = serde_json::to_string_pretty(&tools).context("Failed to render tool catalog")?;
    println!("{}", rendered);
    Ok(())
}
