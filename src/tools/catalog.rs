//! Tool spec building
//!
//! Walks a validated catalog and produces one `ToolInfo` per tool, top-level
//! tools first, then toolsets, both in catalog order. A tool whose entry can't
//! be parsed is logged, recorded and skipped.

use std::fmt;

use serde_json::Value;

use crate::config::ValidationMode;

use super::definition::{ToolDefinition, ToolInfo};

/// A tool entry that could not be turned into a `ToolInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFailure {
    /// Toolset the entry belongs to, if any
    pub toolset: Option<String>,
    /// Tool key in the catalog
    pub tool: String,
    /// Why it was skipped
    pub reason: String,
}

impl fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.toolset {
            Some(set) => write!(f, "{}.{}: {}", set, self.tool, self.reason),
            None => write!(f, "{}: {}", self.tool, self.reason),
        }
    }
}

/// Result of walking a catalog
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    /// Successfully built tools, in catalog order
    pub tools: Vec<ToolInfo>,
    /// Entries that were skipped
    pub failures: Vec<BuildFailure>,
}

impl ToolCatalog {
    /// Build tool info for every tool in `catalog`.
    pub fn build(catalog: &Value, mode: ValidationMode) -> Self {
        let mut result = Self::default();

        if let Some(tools) = catalog.get("tools").and_then(Value::as_object) {
            for (name, entry) in tools {
                result.add_entry(None, name, entry);
            }
        }

        if mode == ValidationMode::Full
            && let Some(toolsets) = catalog.get("toolsets").and_then(Value::as_object)
        {
            for (set_name, toolset) in toolsets {
                let Some(tools) = toolset.get("tools").and_then(Value::as_object) else {
                    result.record_failure(Some(set_name.as_str()), set_name, "toolset has no 'tools' mapping".into());
                    continue;
                };
                for (name, entry) in tools {
                    result.add_entry(Some(set_name.as_str()), name, entry);
                }
            }
        }

        log::info!(
            "Built {} tool(s), skipped {}",
            result.tools.len(),
            result.failures.len()
        );
        result
    }

    fn add_entry(&mut self, toolset: Option<&str>, name: &str, entry: &Value) {
        match ToolDefinition::from_value(name, entry) {
            Ok(definition) => {
                let info = ToolInfo::new(toolset, definition);
                log::debug!("Built tool '{}' ({})", info.full_name, info.function_name);
                self.tools.push(info);
            }
            Err(e) => self.record_failure(toolset, name, e.to_string()),
        }
    }

    fn record_failure(&mut self, toolset: Option<&str>, tool: &str, reason: String) {
        let failure = BuildFailure {
            toolset: toolset.map(str::to_string),
            tool: tool.to_string(),
            reason,
        };
        log::warn!("Skipping tool {}", failure);
        self.failures.push(failure);
    }

    /// Number of built tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tool was built
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up a built tool by full name
    pub fn get(&self, full_name: &str) -> Option<&ToolInfo> {
        self.tools.iter().find(|t| t.full_name == full_name)
    }
}
