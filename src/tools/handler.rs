//! Handler synthesis
//!
//! A `CommandTool` wraps a `ToolInfo` with an explicit, ordered parameter
//! signature. Calls arrive as one JSON argument bag; the signature binds it
//! into a name->value map, which drives template substitution and execution.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use super::command::{ParamMap, substitute, value_text};
use super::definition::{ToolInfo, WORKING_DIR_PARAM};
use super::executor;
use super::{Tool, ToolError};

/// One parameter in a handler signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Added by the engine rather than declared in the catalog
    pub implicit: bool,
}

impl ParamDecl {
    /// Default used when the caller omits the parameter.
    ///
    /// Optional parameters default to the empty string, never to null.
    pub fn default_value(&self) -> Option<&'static str> {
        if self.required { None } else { Some("") }
    }
}

/// Ordered parameter list: required, then optional, then the implicit
/// working directory when one is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<ParamDecl>,
}

impl Signature {
    /// Synthesize the signature for a tool
    pub fn for_tool(info: &ToolInfo) -> Self {
        let declared = |(name, spec): (&String, &super::ParameterSpec)| ParamDecl {
            name: name.clone(),
            description: spec.description.clone(),
            required: spec.required,
            implicit: false,
        };

        let mut params: Vec<ParamDecl> = info.required_parameters().map(declared).collect();
        params.extend(info.optional_parameters().map(declared));

        if info.needs_implicit_working_dir() {
            params.push(ParamDecl {
                name: WORKING_DIR_PARAM.to_string(),
                description: "Directory to run the command in".to_string(),
                required: false,
                implicit: true,
            });
        }

        Self { params }
    }

    /// Parameters in call order
    pub fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&ParamDecl> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Collect declared parameters from a call-site argument bag.
    ///
    /// `args` must be a JSON object (or null for no arguments). Omitted
    /// optional parameters bind to `""`; empty strings supplied by the caller
    /// are kept as-is.
    pub fn bind(&self, tool: &str, args: &Value) -> Result<ParamMap, ToolError> {
        let empty = Map::new();
        let bag = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(ToolError::InvalidInput {
                    message: format!("arguments for '{}' must be an object, got {}", tool, other),
                });
            }
        };

        if let Some(unknown) = bag.keys().find(|k| self.get(k).is_none()) {
            return Err(ToolError::UnexpectedArgument {
                tool: tool.to_string(),
                name: unknown.clone(),
            });
        }

        let mut bound = ParamMap::with_capacity(self.params.len());
        for param in &self.params {
            let value = match (bag.get(&param.name), param.default_value()) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => Value::String(default.to_string()),
                (None, None) => {
                    return Err(ToolError::MissingArgument {
                        tool: tool.to_string(),
                        name: param.name.clone(),
                    });
                }
            };
            bound.insert(param.name.clone(), value);
        }
        Ok(bound)
    }

    /// JSON schema describing the signature.
    ///
    /// Every parameter is a plain string; optional ones carry
    /// `"default": ""` and are never nullable.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!("string"));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(default) = param.default_value() {
                prop.insert("default".to_string(), json!(default));
            }
            properties.insert(param.name.clone(), Value::Object(prop));
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Handler for one catalog tool
#[derive(Debug, Clone)]
pub struct CommandTool {
    info: ToolInfo,
    signature: Signature,
    description: String,
}

impl CommandTool {
    /// Synthesize a handler from tool info
    pub fn new(info: ToolInfo) -> Self {
        for name in info.undeclared_placeholders() {
            log::debug!(
                "Tool '{}' template uses <<{}>> but declares no such parameter; it will be dropped",
                info.full_name,
                name
            );
        }
        let signature = Signature::for_tool(&info);
        let description = info.full_description();
        Self {
            info,
            signature,
            description,
        }
    }

    /// Underlying tool info
    pub fn info(&self) -> &ToolInfo {
        &self.info
    }

    /// Synthesized signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Bind `args` and build the shell command and working directory
    /// without running anything.
    pub fn prepare(&self, args: &Value) -> Result<(String, String), ToolError> {
        let bound = self.signature.bind(&self.info.full_name, args)?;

        let working_dir = if self.info.uses_working_dir {
            bound
                .get(WORKING_DIR_PARAM)
                .and_then(value_text)
                .unwrap_or_default()
        } else {
            String::new()
        };

        // The implicit working_dir is not a template parameter.
        let template_params: ParamMap = bound
            .into_iter()
            .filter(|(name, _)| self.signature.get(name).is_some_and(|p| !p.implicit))
            .collect();

        let command = substitute(&self.info.command_template, &template_params);
        log::debug!("Tool '{}' built command: {}", self.info.full_name, command);
        Ok((command, working_dir))
    }
}

#[async_trait]
impl Tool for CommandTool {
    fn name(&self) -> &str {
        &self.info.full_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        self.signature.input_schema()
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let (command, working_dir) = self.prepare(&args)?;
        Ok(executor::run(&command, &working_dir).await)
    }
}
