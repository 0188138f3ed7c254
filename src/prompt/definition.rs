//! Prompt definitions parsed from the catalog's `prompts` section

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// A single declared prompt argument
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptArgument {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl PromptArgument {
    pub fn new(description: impl Into<String>, required: bool) -> Self {
        Self {
            description: description.into(),
            required,
        }
    }
}

/// A prompt: name, description, template and ordered arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDefinition {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub template: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arguments: IndexMap<String, PromptArgument>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, PromptArgument>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<IndexMap<String, PromptArgument>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PromptDefinition {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            template: template.into(),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, arg: PromptArgument) -> Self {
        self.arguments.insert(name.into(), arg);
        self
    }

    /// Parse one catalog entry
    pub fn from_value(name: &str, value: &Value) -> Result<Self, ConfigError> {
        let mut def: Self = serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidPrompt {
            prompt: name.to_string(),
            reason: e.to_string(),
        })?;
        def.name = name.to_string();
        Ok(def)
    }

    /// Arguments with `required: true`, in declaration order
    pub fn required_arguments(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter(|(_, arg)| arg.required)
            .map(|(name, _)| name.as_str())
    }
}

/// Parse every prompt in the catalog, in catalog order.
///
/// A catalog without a `prompts` section yields no prompts.
pub fn parse_prompts(catalog: &Value) -> Result<Vec<PromptDefinition>, ConfigError> {
    let Some(prompts) = catalog.get("prompts") else {
        return Ok(Vec::new());
    };
    let prompts = prompts
        .as_object()
        .ok_or_else(|| ConfigError::SectionNotAMapping("prompts".to_string()))?;

    prompts
        .iter()
        .map(|(name, entry)| PromptDefinition::from_value(name, entry))
        .collect()
}
