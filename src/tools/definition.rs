//! Tool definitions and derived tool info
//!
//! `ToolDefinition` mirrors one catalog entry. `ToolInfo` is the normalized
//! form built once at registration: resolved names, parameter partition and
//! the description published to callers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::command::placeholders;

/// Name of the working-directory parameter.
pub const WORKING_DIR_PARAM: &str = "working_dir";

/// One declared parameter of a tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Whether the caller must supply a value
    #[serde(default)]
    pub required: bool,
}

impl ParameterSpec {
    /// Create a parameter spec
    pub fn new(description: impl Into<String>, required: bool) -> Self {
        Self {
            description: description.into(),
            required,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawExecution {
    command: String,
    #[serde(default)]
    uses_working_dir: bool,
}

#[derive(Debug, Deserialize)]
struct RawTool {
    #[serde(default)]
    description: Option<String>,
    execution: RawExecution,
    #[serde(default)]
    parameters: Option<IndexMap<String, ParameterSpec>>,
}

/// A tool as declared in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    /// Tool name (catalog key)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Shell command with `<<name>>` placeholders
    pub command_template: String,
    /// Whether the command runs in a caller-supplied directory
    pub uses_working_dir: bool,
    /// Declared parameters, in catalog order
    pub parameters: IndexMap<String, ParameterSpec>,
}

impl ToolDefinition {
    /// Create a definition with no parameters
    pub fn new(name: impl Into<String>, command_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            command_template: command_template.into(),
            uses_working_dir: false,
            parameters: IndexMap::new(),
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the tool as running in a caller-supplied directory
    pub fn with_working_dir(mut self) -> Self {
        self.uses_working_dir = true;
        self
    }

    /// Declare a parameter
    pub fn with_param(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.parameters.insert(name.into(), spec);
        self
    }

    /// Parse one catalog entry
    pub fn from_value(name: &str, value: &Value) -> Result<Self, serde_json::Error> {
        let raw: RawTool = serde_json::from_value(value.clone())?;
        Ok(Self {
            name: name.to_string(),
            description: raw.description.unwrap_or_default(),
            command_template: raw.execution.command,
            uses_working_dir: raw.execution.uses_working_dir,
            parameters: raw.parameters.unwrap_or_default(),
        })
    }
}

/// Resolve the published name of a tool.
///
/// Top-level tools and tools named after their toolset keep their own name;
/// everything else is prefixed with the toolset name.
pub fn resolve_full_name(toolset: Option<&str>, tool: &str) -> String {
    match toolset {
        None => tool.to_string(),
        Some(set) if set == tool => tool.to_string(),
        Some(set) => format!("{}-{}", set, tool),
    }
}

/// Identifier-safe projection of a full name: anything outside
/// `[A-Za-z0-9_]` becomes `_`.
pub fn function_name(full_name: &str) -> String {
    full_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Normalized, read-only view of a tool used for handler synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub tool_name: String,
    pub toolset_name: Option<String>,
    pub full_name: String,
    pub function_name: String,
    pub command_template: String,
    pub uses_working_dir: bool,
    pub description: String,
    pub parameters: IndexMap<String, ParameterSpec>,
}

impl ToolInfo {
    /// Derive tool info from a definition, optionally inside a toolset
    pub fn new(toolset: Option<&str>, definition: ToolDefinition) -> Self {
        let full_name = resolve_full_name(toolset, &definition.name);
        Self {
            function_name: function_name(&full_name),
            full_name,
            tool_name: definition.name,
            toolset_name: toolset.map(str::to_string),
            command_template: definition.command_template,
            uses_working_dir: definition.uses_working_dir,
            description: definition.description,
            parameters: definition.parameters,
        }
    }

    /// Required parameters in declaration order
    pub fn required_parameters(&self) -> impl Iterator<Item = (&String, &ParameterSpec)> {
        self.parameters.iter().filter(|(_, p)| p.required)
    }

    /// Optional parameters in declaration order
    pub fn optional_parameters(&self) -> impl Iterator<Item = (&String, &ParameterSpec)> {
        self.parameters.iter().filter(|(_, p)| !p.required)
    }

    /// Whether `working_dir` is declared explicitly
    pub fn declares_working_dir(&self) -> bool {
        self.parameters.contains_key(WORKING_DIR_PARAM)
    }

    /// Whether the handler must add an implicit `working_dir` parameter
    pub fn needs_implicit_working_dir(&self) -> bool {
        self.uses_working_dir && !self.declares_working_dir()
    }

    /// Placeholders in the command template with no declared parameter.
    /// They are always substituted away.
    pub fn undeclared_placeholders(&self) -> Vec<String> {
        placeholders(&self.command_template)
            .into_iter()
            .filter(|name| !self.parameters.contains_key(name))
            .collect()
    }

    /// Description published to callers: purpose, command, parameters and
    /// safety notes.
    pub fn full_description(&self) -> String {
        let mut lines: Vec<String> = vec![
            "TOOL DESCRIPTION:".to_string(),
            String::new(),
            self.description.trim().to_string(),
            String::new(),
            "COMMAND CALLED:".to_string(),
            String::new(),
            format!("`{}`", self.command_template),
        ];

        if self.command_template.contains("<<")
            && let Some(first) = self.parameters.keys().next()
        {
            lines.push(String::new());
            lines.push(format!(
                "Text like <<parameter_name>> (e.g. <<{}>>) will be replaced with parameter values.",
                first
            ));
        }

        if !self.parameters.is_empty() || self.needs_implicit_working_dir() {
            lines.push(String::new());
            lines.push("PARAMETERS:".to_string());
            lines.push(String::new());
        }

        for (name, spec) in &self.parameters {
            let status = if spec.required { "[REQUIRED]" } else { "[OPTIONAL]" };
            let hint = type_hint(name).map(|h| format!(" {}", h)).unwrap_or_default();
            lines.push(format!("- {} {}{}: {}", name, status, hint, spec.description));
        }

        if self.needs_implicit_working_dir() {
            lines.push(format!(
                "- {} [OPTIONAL] (string, directory path): Directory to run the command in",
                WORKING_DIR_PARAM
            ));
        }

        let notes = safety_notes(&self.command_template);
        if !notes.is_empty() {
            lines.push(String::new());
            lines.push("IMPORTANT NOTES:".to_string());
            lines.push(String::new());
            lines.extend(notes.into_iter().map(str::to_string));
        }

        lines.join("\n")
    }
}

/// Type hint inferred from a parameter name.
fn type_hint(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

    if has(&["file", "path"]) {
        Some("(string, file path)")
    } else if has(&["pattern", "glob"]) {
        Some("(string, glob pattern)")
    } else if has(&["number", "count", "limit"]) {
        Some("(integer)")
    } else if has(&["enabled", "flag"]) {
        Some("(boolean)")
    } else if has(&["url"]) {
        Some("(string, URL)")
    } else {
        None
    }
}

const DELETE_OPS: &[&str] = &["rm ", "remove ", "delete "];
const MOVE_OPS: &[&str] = &["mv ", "move "];
const WRITE_OPS: &[&str] = &["write ", "create "];
const WRITE_REDIRECTS: &[&str] = &[" > ", " >> "];

/// Warnings for commands that delete, move or write data.
fn safety_notes(command_template: &str) -> Vec<&'static str> {
    let cmd = command_template.to_lowercase();
    let any = |ops: &[&str]| ops.iter().any(|op| cmd.contains(op));

    let mut notes = Vec::new();
    if any(DELETE_OPS) {
        notes.push("- This command can DELETE files or data. Use with caution.");
    }
    if any(MOVE_OPS) {
        notes.push("- This command can MOVE files or data. Verify paths are correct.");
    }
    if any(WRITE_OPS) || any(WRITE_REDIRECTS) {
        notes.push("- This command can CREATE or MODIFY files or data.");
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_name_top_level() {
        assert_eq!(resolve_full_name(None, "ls"), "ls");
    }

    #[test]
    fn test_full_name_same_as_toolset() {
        assert_eq!(resolve_full_name(Some("db"), "db"), "db");
    }

    #[test]
    fn test_full_name_prefixed() {
        assert_eq!(resolve_full_name(Some("db"), "get"), "db-get");
    }

    #[test]
    fn test_function_name() {
        assert_eq!(function_name("db-get"), "db_get");
        assert_eq!(function_name("find.files v2"), "find_files_v2");
        assert_eq!(function_name("already_ok9"), "already_ok9");
    }

    #[test]
    fn test_definition_from_value() {
        let def = ToolDefinition::from_value(
            "tail",
            &json!({
                "description": "Tail a file",
                "execution": {"command": "tail -n <<lines>> <<file>>", "uses_working_dir": true},
                "parameters": {
                    "file": {"description": "File", "required": true},
                    "lines": {"description": "Lines"}
                }
            }),
        )
        .unwrap();

        assert_eq!(def.name, "tail");
        assert_eq!(def.command_template, "tail -n <<lines>> <<file>>");
        assert!(def.uses_working_dir);
        assert_eq!(def.parameters.keys().collect::<Vec<_>>(), vec!["file", "lines"]);
        assert!(def.parameters["file"].required);
        assert!(!def.parameters["lines"].required);
    }

    #[test]
    fn test_definition_defaults() {
        let def = ToolDefinition::from_value(
            "ls",
            &json!({"execution": {"command": "ls"}, "parameters": null}),
        )
        .unwrap();
        assert_eq!(def.description, "");
        assert!(!def.uses_working_dir);
        assert!(def.parameters.is_empty());
    }

    #[test]
    fn test_definition_rejects_bad_parameters() {
        let result = ToolDefinition::from_value(
            "bad",
            &json!({"execution": {"command": "ls"}, "parameters": ["a", "b"]}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_info_partition() {
        let def = ToolDefinition::new("find", "find <<dir>> -name <<pattern>>")
            .with_param("pattern", ParameterSpec::new("Pattern", false))
            .with_param("dir", ParameterSpec::new("Directory", true));
        let info = ToolInfo::new(Some("files"), def);

        assert_eq!(info.full_name, "files-find");
        assert_eq!(info.function_name, "files_find");
        assert_eq!(info.toolset_name.as_deref(), Some("files"));
        let required: Vec<_> = info.required_parameters().map(|(n, _)| n.as_str()).collect();
        let optional: Vec<_> = info.optional_parameters().map(|(n, _)| n.as_str()).collect();
        assert_eq!(required, vec!["dir"]);
        assert_eq!(optional, vec!["pattern"]);
    }

    #[test]
    fn test_implicit_working_dir() {
        let info = ToolInfo::new(None, ToolDefinition::new("ls", "ls").with_working_dir());
        assert!(info.needs_implicit_working_dir());

        let explicit = ToolDefinition::new("ls", "ls")
            .with_working_dir()
            .with_param(WORKING_DIR_PARAM, ParameterSpec::new("Where", true));
        let info = ToolInfo::new(None, explicit);
        assert!(!info.needs_implicit_working_dir());
        assert!(info.declares_working_dir());
    }

    #[test]
    fn test_full_description_sections() {
        let def = ToolDefinition::new("tail", "tail -n <<lines>> <<file_path>>")
            .with_description("  Show the end of a file  ")
            .with_param("file_path", ParameterSpec::new("File to read", true))
            .with_param("lines", ParameterSpec::new("Line count", false));
        let text = ToolInfo::new(None, def).full_description();

        assert!(text.starts_with("TOOL DESCRIPTION:\n\nShow the end of a file\n"));
        assert!(text.contains("COMMAND CALLED:\n\n`tail -n <<lines>> <<file_path>>`"));
        assert!(text.contains("(e.g. <<file_path>>)"));
        assert!(text.contains("- file_path [REQUIRED] (string, file path): File to read"));
        assert!(text.contains("- lines [OPTIONAL]: Line count"));
        assert!(!text.contains("IMPORTANT NOTES"));
    }

    #[test]
    fn test_full_description_working_dir_only() {
        let info = ToolInfo::new(None, ToolDefinition::new("ls", "ls -la").with_working_dir());
        let text = info.full_description();
        assert!(text.contains("PARAMETERS:"));
        assert!(text.contains("- working_dir [OPTIONAL] (string, directory path)"));
    }

    #[test]
    fn test_full_description_safety_notes() {
        let info = ToolInfo::new(None, ToolDefinition::new("clean", "rm -rf <<path>>"));
        let text = info.full_description();
        assert!(text.contains("IMPORTANT NOTES:"));
        assert!(text.contains("can DELETE"));
        assert!(!text.contains("can MOVE"));

        let info = ToolInfo::new(None, ToolDefinition::new("save", "echo <<text>> > <<file>>"));
        let text = info.full_description();
        assert!(text.contains("can CREATE or MODIFY"));

        let info = ToolInfo::new(None, ToolDefinition::new("rename", "mv <<a>> <<b>>"));
        assert!(info.full_description().contains("can MOVE"));
    }

    #[test]
    fn test_read_only_commands_have_no_notes() {
        for template in ["echo <<msg>>", "cat <<file>>", "touch -c <<file>>"] {
            let info = ToolInfo::new(None, ToolDefinition::new("t", template));
            assert!(!info.full_description().contains("IMPORTANT NOTES"), "{}", template);
        }
    }

    #[test]
    fn test_undeclared_placeholders() {
        let def = ToolDefinition::new("find", "find <<dir>> -name <<pattern>> <<depth>>")
            .with_param("dir", ParameterSpec::new("Directory", true));
        let info = ToolInfo::new(None, def);
        assert_eq!(info.undeclared_placeholders(), vec!["pattern".to_string(), "depth".to_string()]);

        let info = ToolInfo::new(None, ToolDefinition::new("ls", "ls -la"));
        assert!(info.undeclared_placeholders().is_empty());
    }

    #[test]
    fn test_type_hints() {
        assert_eq!(type_hint("source_path"), Some("(string, file path)"));
        assert_eq!(type_hint("glob"), Some("(string, glob pattern)"));
        assert_eq!(type_hint("max_count"), Some("(integer)"));
        assert_eq!(type_hint("verbose_flag"), Some("(boolean)"));
        assert_eq!(type_hint("repo_url"), Some("(string, URL)"));
        assert_eq!(type_hint("query"), None);
    }
}
