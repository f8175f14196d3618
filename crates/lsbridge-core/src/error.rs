use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("mcp error: {0}")]
    Mcp(#[from] McpError),

    #[error("tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Stable error categories surfaced in tool error content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolErrorCode {
    InvalidInput,
    ToolNotFound,
    ToolNotConfigured,
    BackendStatus,
    BackendUnavailable,
    BackendInvalidResponse,
    InternalError,
}

impl ProtocolErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::ToolNotFound => "tool_not_found",
            Self::ToolNotConfigured => "tool_not_configured",
            Self::BackendStatus => "backend_status",
            Self::BackendUnavailable => "backend_unavailable",
            Self::BackendInvalidResponse => "backend_invalid_response",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ProtocolErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("invalid config value: {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum McpError {
    #[error("method not found: {method}")]
    MethodNotFound { method: String },

    #[error("duplicate tool definition: {name}")]
    DuplicateTool { name: String },

    #[error("backend client setup failed: {0}")]
    BackendSetup(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Arguments rejected before any backend traffic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Arguments must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("Missing required arguments: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Field '{field}' must be of type {expected}")]
    TypeMismatch { field: String, expected: String },

    #[error("Invalid arguments: {0}")]
    Malformed(String),
}

/// Failure talking to the code-intelligence backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend request failed: {message}")]
    Transport { message: String },

    #[error("backend response could not be decoded: {message}")]
    Decode { message: String },
}

impl BackendError {
    /// Convenience constructor, use with `.map_err(BackendError::transport)`.
    pub fn transport<E: std::fmt::Display>(e: E) -> Self {
        Self::Transport {
            message: e.to_string(),
        }
    }

    pub fn decode<E: std::fmt::Display>(e: E) -> Self {
        Self::Decode {
            message: e.to_string(),
        }
    }

    /// HTTP status of the failed response, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownToolReason {
    NotFound,
    NotConfigured,
}

impl std::fmt::Display for UnknownToolReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("tool not found"),
            Self::NotConfigured => f.write_str("tool not properly configured"),
        }
    }
}

/// Every way a single tool invocation can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{reason}: {name}")]
    UnknownTool {
        name: String,
        reason: UnknownToolReason,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("failed to format tool result: {0}")]
    Formatting(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::UnknownTool {
            name: name.into(),
            reason: UnknownToolReason::NotFound,
        }
    }

    pub fn not_configured(name: impl Into<String>) -> Self {
        Self::UnknownTool {
            name: name.into(),
            reason: UnknownToolReason::NotConfigured,
        }
    }

    pub fn code(&self) -> ProtocolErrorCode {
        match self {
            Self::Validation(_) => ProtocolErrorCode::InvalidInput,
            Self::UnknownTool {
                reason: UnknownToolReason::NotFound,
                ..
            } => ProtocolErrorCode::ToolNotFound,
            Self::UnknownTool {
                reason: UnknownToolReason::NotConfigured,
                ..
            } => ProtocolErrorCode::ToolNotConfigured,
            Self::Backend(BackendError::Status { .. }) => ProtocolErrorCode::BackendStatus,
            Self::Backend(BackendError::Transport { .. }) => ProtocolErrorCode::BackendUnavailable,
            Self::Backend(BackendError::Decode { .. }) => ProtocolErrorCode::BackendInvalidResponse,
            Self::Formatting(_) | Self::Internal(_) => ProtocolErrorCode::InternalError,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_code_strings_match_registry() {
        assert_eq!(ProtocolErrorCode::InvalidInput.as_str(), "invalid_input");
        assert_eq!(ProtocolErrorCode::ToolNotFound.as_str(), "tool_not_found");
        assert_eq!(
            ProtocolErrorCode::BackendUnavailable.as_str(),
            "backend_unavailable"
        );
        assert_eq!(ProtocolErrorCode::InternalError.as_str(), "internal_error");
    }

    #[test]
    fn missing_fields_are_enumerated_in_order() {
        let err = ValidationError::MissingFields {
            fields: vec!["path".into(), "start".into()],
        };
        assert_eq!(err.to_string(), "Missing required arguments: path, start");
    }

    #[test]
    fn unknown_tool_reasons_map_to_distinct_codes() {
        let missing = ToolError::not_found("rename");
        let broken = ToolError::not_configured("list_files");
        assert_eq!(missing.to_string(), "tool not found: rename");
        assert_eq!(
            broken.to_string(),
            "tool not properly configured: list_files"
        );
        assert_eq!(missing.code(), ProtocolErrorCode::ToolNotFound);
        assert_eq!(broken.code(), ProtocolErrorCode::ToolNotConfigured);
    }

    #[test]
    fn backend_status_is_only_present_for_http_failures() {
        let status = BackendError::Status {
            status: 404,
            body: "not found".into(),
        };
        assert_eq!(status.status(), Some(404));
        assert_eq!(BackendError::transport("connection refused").status(), None);
        assert_eq!(
            ToolError::from(status).code(),
            ProtocolErrorCode::BackendStatus
        );
    }
}
