//! Error types for mcp-this
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::prompt::PromptError;
use crate::tools::ToolError;

/// Problems with the shape of a catalog or with locating/parsing it.
///
/// These are fatal at startup: a catalog that fails validation never reaches
/// handler synthesis.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Catalog root is not a mapping
    #[error("Configuration must be a dictionary")]
    NotAMapping,

    /// Neither `tools` nor `toolsets` present
    #[error("Configuration must contain a 'tools' and/or 'toolsets' section")]
    MissingSections,

    /// Top-level-only mode without a `tools` section
    #[error("Configuration must contain a 'tools' section")]
    MissingTools,

    /// A section that must be a mapping is something else
    #[error("'{0}' must be a dictionary")]
    SectionNotAMapping(String),

    /// A tool entry is malformed
    #[error("Tool '{tool}' {reason}")]
    InvalidTool { tool: String, reason: String },

    /// A toolset entry is malformed
    #[error("Toolset '{toolset}' {reason}")]
    InvalidToolset { toolset: String, reason: String },

    /// A prompt entry is malformed
    #[error("Prompt '{prompt}' {reason}")]
    InvalidPrompt { prompt: String, reason: String },

    /// A prompt argument entry is malformed
    #[error("Argument '{argument}' {reason}")]
    InvalidPromptArgument { argument: String, reason: String },

    /// Explicit catalog path does not exist
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Catalog file parsed to nothing
    #[error("Configuration file is empty: {0}")]
    EmptyFile(String),

    /// Catalog file could not be read or parsed
    #[error("Error loading configuration: {0}")]
    Load(String),

    /// Inline catalog parsed to an empty object
    #[error("Configuration value is empty")]
    EmptyValue,

    /// Inline catalog is not valid JSON
    #[error("Error parsing JSON configuration: {0}")]
    Json(String),

    /// No source yielded a catalog
    #[error("No configuration provided")]
    NotProvided,
}

/// All error types that can occur in mcp-this
#[derive(Debug, Error)]
pub enum McpThisError {
    /// Catalog validation or loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// No prompt registered under this name
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    /// Tool arguments did not match the handler's signature
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Prompt arguments did not match the prompt's declaration
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Two tools resolved to the same published name
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for mcp-this operations
pub type Result<T> = std::result::Result<T, McpThisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_mapping_error() {
        assert_eq!(ConfigError::NotAMapping.to_string(), "Configuration must be a dictionary");
    }

    #[test]
    fn test_invalid_tool_error() {
        let err = ConfigError::InvalidTool {
            tool: "ls".to_string(),
            reason: "must contain an 'execution' section".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'ls' must contain an 'execution' section");
    }

    #[test]
    fn test_invalid_prompt_argument_error() {
        let err = ConfigError::InvalidPromptArgument {
            argument: "arg1".to_string(),
            reason: "in prompt 'test' must be a dictionary".to_string(),
        };
        assert_eq!(err.to_string(), "Argument 'arg1' in prompt 'test' must be a dictionary");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: McpThisError = ConfigError::MissingSections.into();
        assert!(matches!(err, McpThisError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration must contain a 'tools' and/or 'toolsets' section"
        );
    }

    #[test]
    fn test_unknown_tool_error() {
        let err = McpThisError::UnknownTool("git-status".to_string());
        assert_eq!(err.to_string(), "Unknown tool: git-status");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: McpThisError = io_err.into();
        assert!(matches!(err, McpThisError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: McpThisError = json_err.into();
        assert!(matches!(err, McpThisError::Json(_)));
    }
}
