/// Backend base URL used when nothing else is configured.
pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:4444";

/// Versioned API prefix inserted between the base URL and every endpoint path.
pub const DEFAULT_API_PREFIX: &str = "/v1";

/// Default data directory name under home.
pub const DEFAULT_DATA_DIR: &str = ".lsbridge";

/// Config file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Server name reported in the MCP `initialize` handshake.
pub const SERVER_NAME: &str = "lsbridge";

/// MCP protocol revision spoken by the server.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Default port for the HTTP transport.
pub const DEFAULT_HTTP_PORT: u16 = 9200;

/// JSON-RPC error codes.
pub const JSONRPC_PARSE_ERROR: i32 = -32700;
pub const JSONRPC_METHOD_NOT_FOUND: i32 = -32601;
pub const JSONRPC_INTERNAL_ERROR: i32 = -32603;
