//! Tool and prompt registry
//!
//! Built once from a validated catalog and passed by value to whatever
//! transport serves it. Handlers are `Arc`s so concurrent calls can run
//! without holding a borrow of the registry.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::config::{ValidationMode, validate_catalog};
use crate::error::{McpThisError, Result};
use crate::prompt::{PromptHandler, parse_prompts};
use crate::tools::{BuildFailure, CommandTool, Tool, ToolCatalog};

/// Named tool and prompt handlers, in registration order
#[derive(Default)]
pub struct Registry {
    tools: IndexMap<String, Arc<dyn Tool>>,
    prompts: IndexMap<String, PromptHandler>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("prompts", &self.prompts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `catalog`, synthesize every handler and register it.
    ///
    /// Catalog shape errors are fatal. Tools that fail to build, or whose
    /// name is already taken, are skipped and returned alongside the registry.
    pub fn from_catalog(catalog: &Value, mode: ValidationMode) -> Result<(Self, Vec<BuildFailure>)> {
        validate_catalog(catalog, mode)?;

        let ToolCatalog { tools, mut failures } = ToolCatalog::build(catalog, mode);
        let mut registry = Self::new();

        for info in tools {
            let toolset = info.toolset_name.clone();
            let tool = info.tool_name.clone();
            if let Err(e) = registry.register_tool(Arc::new(CommandTool::new(info))) {
                log::warn!("Skipping tool {}: {}", tool, e);
                failures.push(BuildFailure {
                    toolset,
                    tool,
                    reason: e.to_string(),
                });
            }
        }

        for definition in parse_prompts(catalog)? {
            registry.register_prompt(PromptHandler::new(definition));
        }

        log::info!(
            "Registered {} tool(s) and {} prompt(s)",
            registry.tools.len(),
            registry.prompts.len()
        );
        Ok((registry, failures))
    }

    /// Register a tool under its own name. The first registration wins.
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(McpThisError::DuplicateTool(name));
        }
        log::info!("Registered tool '{}'", name);
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Register a prompt, replacing any prompt with the same name
    pub fn register_prompt(&mut self, prompt: PromptHandler) {
        log::info!("Registered prompt '{}'", prompt.name());
        self.prompts.insert(prompt.name().to_string(), prompt);
    }

    pub fn list_tools(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    pub fn tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Invoke a tool by name.
    ///
    /// Command failures are returned as `Ok` text; `Err` means the name or
    /// arguments were wrong.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<String> {
        let tool = self
            .tool(name)
            .ok_or_else(|| McpThisError::UnknownTool(name.to_string()))?;
        Ok(tool.call(args).await?)
    }

    pub fn list_prompts(&self) -> impl Iterator<Item = &PromptHandler> {
        self.prompts.values()
    }

    pub fn prompt(&self, name: &str) -> Option<&PromptHandler> {
        self.prompts.get(name)
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    /// Render a prompt by name
    pub fn get_prompt(&self, name: &str, args: &Value) -> Result<String> {
        let prompt = self
            .prompt(name)
            .ok_or_else(|| McpThisError::UnknownPrompt(name.to_string()))?;
        Ok(prompt.render(args)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::tools::{ToolDefinition, ToolInfo};
    use serde_json::json;

    #[test]
    fn test_from_catalog_registers_tools_and_prompts() {
        let catalog = json!({
            "tools": {"hello": {"description": "Say hello", "execution": {"command": "echo hello"}}},
            "prompts": {"greet": {"description": "Greet", "template": "Hi {{name}}",
                "arguments": {"name": {"description": "Name", "required": true}}}}
        });
        let (registry, failures) = Registry::from_catalog(&catalog, ValidationMode::Full).unwrap();
        assert!(failures.is_empty());
        assert_eq!(registry.tool_count(), 1);
        assert_eq!(registry.prompt_count(), 1);
        assert!(registry.tool("hello").is_some());
        assert!(registry.prompt("greet").is_some());
    }

    #[test]
    fn test_invalid_catalog_is_fatal() {
        let err = Registry::from_catalog(&json!({"tools": {"x": {}}}), ValidationMode::Full).unwrap_err();
        assert!(matches!(err, McpThisError::Config(ConfigError::InvalidTool { .. })));
    }

    #[test]
    fn test_duplicate_full_name_first_wins() {
        // top-level `db-get` and toolset `db`/`get` both resolve to `db-get`
        let catalog = json!({
            "tools": {"db-get": {"description": "first", "execution": {"command": "echo first"}}},
            "toolsets": {"db": {"tools": {"get": {"description": "second", "execution": {"command": "echo second"}}}}}
        });
        let (registry, failures) = Registry::from_catalog(&catalog, ValidationMode::Full).unwrap();
        assert_eq!(registry.tool_count(), 1);
        assert!(registry.tool("db-get").unwrap().description().contains("first"));
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].toolset.as_deref(), Some("db"));
        assert_eq!(failures[0].reason, "Duplicate tool name: db-get");
    }

    #[test]
    fn test_register_tool_rejects_duplicate() {
        let mut registry = Registry::new();
        let make = || Arc::new(CommandTool::new(ToolInfo::new(None, ToolDefinition::new("t", "true"))));
        registry.register_tool(make()).unwrap();
        let err = registry.register_tool(make()).unwrap_err();
        assert!(matches!(err, McpThisError::DuplicateTool(ref n) if n == "t"));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let err = Registry::new().call_tool("nope", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_call_tool() {
        let catalog = json!({"tools": {"hello": {"execution": {"command": "echo hello"}}}});
        let (registry, _) = Registry::from_catalog(&catalog, ValidationMode::Full).unwrap();
        assert_eq!(registry.call_tool("hello", json!({})).await.unwrap(), "hello\n");
    }

    #[test]
    fn test_get_unknown_prompt() {
        let err = Registry::new().get_prompt("nope", &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown prompt: nope");
    }
}
