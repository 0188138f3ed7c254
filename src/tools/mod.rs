//! Tool System - definitions, catalog building, command templates,
//! execution, and synthesized handlers

mod catalog;
mod command;
mod definition;
pub mod executor;
mod handler;

pub use catalog::{BuildFailure, ToolCatalog};
pub use command::{ParamMap, placeholders, substitute, value_text};
pub use definition::{ParameterSpec, ToolDefinition, ToolInfo, WORKING_DIR_PARAM, function_name, resolve_full_name};
pub use executor::{ExecOutcome, run};
pub use handler::{CommandTool, ParamDecl, Signature};

use async_trait::async_trait;
use serde_json::Value;

/// A callable tool exposed to a transport
#[async_trait]
pub trait Tool: Send + Sync {
    /// Published tool name
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Invoke the tool with a JSON object of arguments.
    ///
    /// Command failures come back as `Ok` text; `Err` is reserved for
    /// arguments that don't fit the signature.
    async fn call(&self, args: Value) -> Result<String, ToolError>;
}

/// Errors raised before a tool's command is run
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool '{tool}' is missing required argument '{name}'")]
    MissingArgument { tool: String, name: String },

    #[error("Tool '{tool}' got unexpected argument '{name}'")]
    UnexpectedArgument { tool: String, name: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages() {
        let err = ToolError::MissingArgument {
            tool: "git-log".to_string(),
            name: "path".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'git-log' is missing required argument 'path'");

        let err = ToolError::UnexpectedArgument {
            tool: "ls".to_string(),
            name: "color".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'ls' got unexpected argument 'color'");
    }
}
