//! Command template substitution
//!
//! Templates carry `<<name>>` placeholders. Substitution is purely textual:
//! values are inserted verbatim with no shell quoting.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

/// Call-site parameter values keyed by parameter name, in declaration order.
pub type ParamMap = IndexMap<String, Value>;

static LEFTOVER_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<<\w+>>").expect("placeholder pattern is valid"));

/// Text form of a parameter value, or `None` when the value counts as absent.
///
/// Only null and the empty string are absent; `0` and `false` are real values.
/// Bools are written in lowercase (`true` / `false`), as serde_json prints them.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Build a shell command from `template` by filling in `params`.
///
/// Supplied values replace every occurrence of their placeholder; absent
/// values and placeholders with no supplied parameter are dropped. Whitespace
/// runs collapse to a single space and the result is trimmed.
///
/// Values are not escaped, and they are not protected from later passes
/// either: a value containing `<<other>>` is filled by a later parameter or
/// removed with the leftover placeholders.
pub fn substitute(template: &str, params: &ParamMap) -> String {
    let mut result = template.to_string();

    for (name, value) in params {
        let placeholder = format!("<<{}>>", name);
        let replacement = value_text(value).unwrap_or_default();
        result = result.replace(&placeholder, &replacement);
    }

    let result = LEFTOVER_PLACEHOLDER.replace_all(&result, "");
    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Placeholder names referenced by `template`, first occurrence order.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for m in LEFTOVER_PLACEHOLDER.find_iter(template) {
        let name = &m.as_str()[2..m.as_str().len() - 2];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
