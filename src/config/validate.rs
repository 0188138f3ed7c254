//! Catalog shape validation
//!
//! Runs before any synthesis step. Only the structural skeleton that the
//! builder relies on is checked here; per-tool details such as parameter
//! shapes are left to the builder, which skips bad entries instead of failing.

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// How much of the catalog layout is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// `tools` and/or `toolsets`
    #[default]
    Full,
    /// A single top-level `tools` section; `toolsets` is ignored
    TopLevelOnly,
}

/// Check a raw catalog before it is handed to the builder.
pub fn validate_catalog(catalog: &Value, mode: ValidationMode) -> Result<(), ConfigError> {
    let root = catalog.as_object().ok_or(ConfigError::NotAMapping)?;

    match mode {
        ValidationMode::Full => {
            if !root.contains_key("tools") && !root.contains_key("toolsets") {
                return Err(ConfigError::MissingSections);
            }
            if let Some(tools) = root.get("tools") {
                validate_tools(tools, "tools")?;
            }
            if let Some(toolsets) = root.get("toolsets") {
                validate_toolsets(toolsets)?;
            }
        }
        ValidationMode::TopLevelOnly => {
            let tools = root.get("tools").ok_or(ConfigError::MissingTools)?;
            validate_tools(tools, "tools")?;
        }
    }

    if let Some(prompts) = root.get("prompts") {
        validate_prompts(prompts)?;
    }

    Ok(())
}

fn as_section<'a>(value: &'a Value, section: &str) -> Result<&'a Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| ConfigError::SectionNotAMapping(section.to_string()))
}

fn validate_tools(tools: &Value, section: &str) -> Result<(), ConfigError> {
    for (name, tool) in as_section(tools, section)? {
        validate_tool(name, tool)?;
    }
    Ok(())
}

fn validate_tool(name: &str, tool: &Value) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidTool {
        tool: name.to_string(),
        reason: reason.to_string(),
    };

    let tool = tool.as_object().ok_or_else(|| invalid("must be a dictionary"))?;
    let execution = tool
        .get("execution")
        .ok_or_else(|| invalid("must contain an 'execution' section"))?
        .as_object()
        .ok_or_else(|| invalid("execution section must be a dictionary"))?;

    match execution.get("command") {
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(invalid("execution command must be a string")),
        None => Err(invalid("execution must contain a 'command'")),
    }
}

fn validate_toolsets(toolsets: &Value) -> Result<(), ConfigError> {
    for (name, toolset) in as_section(toolsets, "toolsets")? {
        let invalid = |reason: &str| ConfigError::InvalidToolset {
            toolset: name.to_string(),
            reason: reason.to_string(),
        };

        let toolset = toolset.as_object().ok_or_else(|| invalid("must be a dictionary"))?;
        let tools = toolset
            .get("tools")
            .ok_or_else(|| invalid("must contain a 'tools' section"))?;
        validate_tools(tools, &format!("toolsets.{}.tools", name))?;
    }
    Ok(())
}

fn validate_prompts(prompts: &Value) -> Result<(), ConfigError> {
    for (name, prompt) in as_section(prompts, "prompts")? {
        validate_prompt(name, prompt)?;
    }
    Ok(())
}

fn validate_prompt(name: &str, prompt: &Value) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidPrompt {
        prompt: name.to_string(),
        reason: reason.to_string(),
    };

    let prompt = prompt.as_object().ok_or_else(|| invalid("must be a dictionary"))?;

    match prompt.get("description") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(invalid("description must be a string")),
        None => return Err(invalid("must contain a 'description'")),
    }

    match prompt.get("template") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(invalid("template must be a string")),
        None => return Err(invalid("must contain a 'template'")),
    }

    if let Some(arguments) = prompt.get("arguments") {
        let arguments = arguments
            .as_object()
            .ok_or_else(|| invalid("arguments must be a dictionary"))?;
        for (arg_name, arg) in arguments {
            validate_prompt_argument(name, arg_name, arg)?;
        }
    }

    Ok(())
}

fn validate_prompt_argument(prompt: &str, name: &str, arg: &Value) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidPromptArgument {
        argument: name.to_string(),
        reason,
    };

    if !is_identifier(name) {
        return Err(invalid(format!(
            "in prompt '{}' must be a valid identifier (letters, digits, underscore)",
            prompt
        )));
    }

    let arg = arg
        .as_object()
        .ok_or_else(|| invalid(format!("in prompt '{}' must be a dictionary", prompt)))?;

    match arg.get("description") {
        Some(Value::String(_)) => {}
        Some(_) => {
            return Err(invalid(format!(
                "description in prompt '{}' must be a string",
                prompt
            )));
        }
        None => {
            return Err(invalid(format!(
                "in prompt '{}' must contain a 'description'",
                prompt
            )));
        }
    }

    match arg.get("required") {
        Some(Value::Bool(_)) => Ok(()),
        Some(_) => Err(invalid(format!(
            "required field in prompt '{}' must be a boolean",
            prompt
        ))),
        None => Err(invalid(format!(
            "in prompt '{}' must contain a 'required' field",
            prompt
        ))),
    }
}

/// Letters, digits and underscore, not starting with a digit.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
