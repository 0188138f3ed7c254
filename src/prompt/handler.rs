//! Prompt handlers

use serde_json::{Map, Value};

use crate::tools::value_text;

use super::PromptError;
use super::definition::{PromptArgument, PromptDefinition};
use super::render::{PromptArgs, render};

/// Renders one catalog prompt
#[derive(Debug, Clone)]
pub struct PromptHandler {
    definition: PromptDefinition,
}

impl PromptHandler {
    pub fn new(definition: PromptDefinition) -> Self {
        Self { definition }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    /// Declared arguments in order
    pub fn arguments(&self) -> impl Iterator<Item = (&str, &PromptArgument)> {
        self.definition.arguments.iter().map(|(name, arg)| (name.as_str(), arg))
    }

    pub fn definition(&self) -> &PromptDefinition {
        &self.definition
    }

    /// Render the template with a JSON argument bag.
    ///
    /// Required arguments must be present and non-empty. Non-string scalars
    /// are converted to text the same way tool parameters are.
    pub fn render(&self, args: &Value) -> Result<String, PromptError> {
        let empty = Map::new();
        let bag = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(PromptError::InvalidInput {
                    message: format!("arguments for '{}' must be an object, got {}", self.name(), other),
                });
            }
        };

        if let Some(unknown) = bag.keys().find(|k| !self.definition.arguments.contains_key(*k)) {
            return Err(PromptError::UnexpectedArgument {
                prompt: self.name().to_string(),
                name: unknown.clone(),
            });
        }

        let mut bound = PromptArgs::with_capacity(bag.len());
        for (name, arg) in &self.definition.arguments {
            match bag.get(name).and_then(value_text) {
                Some(text) => {
                    bound.insert(name.clone(), text);
                }
                None if arg.required => {
                    return Err(PromptError::MissingArgument {
                        prompt: self.name().to_string(),
                        name: name.clone(),
                    });
                }
                None => {}
            }
        }

        log::debug!("Rendering prompt '{}' with {} argument(s)", self.name(), bound.len());
        Ok(render(&self.definition.template, &bound))
    }
}
