pub mod call;
pub mod list_tools;
pub mod serve_mcp;
