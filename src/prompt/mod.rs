//! Prompt System - definitions, template rendering and handlers
//!
//! Prompts use `{{name}}` variables and `{{#if name}}...{{else}}...{{/if}}`
//! blocks, kept distinct from the `<<name>>` placeholders of tool commands.

mod definition;
mod handler;
mod render;

pub use definition::{PromptArgument, PromptDefinition, parse_prompts};
pub use handler::PromptHandler;
pub use render::{PromptArgs, is_truthy, render};

/// Errors raised when prompt arguments don't fit the declaration
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt '{prompt}' is missing required argument '{name}'")]
    MissingArgument { prompt: String, name: String },

    #[error("Prompt '{prompt}' got unexpected argument '{name}'")]
    UnexpectedArgument { prompt: String, name: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_error_messages() {
        let err = PromptError::MissingArgument {
            prompt: "review".to_string(),
            name: "code".to_string(),
        };
        assert_eq!(err.to_string(), "Prompt 'review' is missing required argument 'code'");
    }
}
