use serde::{Deserialize, Serialize};

/// A zero-indexed cursor location inside a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// A position qualified by the workspace-relative file it points into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilePosition {
    pub path: String,
    pub position: Position,
}

/// A span of source text between two positions of one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub path: String,
    pub start: Position,
    pub end: Position,
}

/// The closed set of tools the bridge exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    DefinitionsInFile,
    FindDefinition,
    FindReferences,
    ListFiles,
    ReadSourceCode,
}

impl ToolKind {
    /// Every tool, in catalog order.
    pub const ALL: [ToolKind; 5] = [
        Self::DefinitionsInFile,
        Self::FindDefinition,
        Self::FindReferences,
        Self::ListFiles,
        Self::ReadSourceCode,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DefinitionsInFile => "definitions_in_file",
            Self::FindDefinition => "find_definition",
            Self::FindReferences => "find_references",
            Self::ListFiles => "list_files",
            Self::ReadSourceCode => "read_source_code",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Backend path for this tool, relative to the API prefix.
    pub const fn default_endpoint(self) -> &'static str {
        match self {
            Self::DefinitionsInFile => "/symbol/definitions-in-file",
            Self::FindDefinition => "/symbol/find-definition",
            Self::FindReferences => "/symbol/find-references",
            Self::ListFiles => "/workspace/list-files",
            Self::ReadSourceCode => "/workspace/read-source-code",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Error,
}

/// One unit of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub kind: ContentKind,
    pub text: String,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ContentKind::Error
    }
}
