//! Prompt template rendering
//!
//! Supported syntax:
//! - `{{name}}` variable reference
//! - `{{#if name}}...{{/if}}`
//! - `{{#if name}}...{{else}}...{{/if}}`
//!
//! Conditional blocks are matched non-greedily and may span lines. They do
//! not nest: an inner `{{#if}}` ends the outer block at the first `{{/if}}`.
//! Supporting nesting would need a real block parser instead of the single
//! regex pass used here.
//!
//! Handlebars is not used: it would treat an unknown `{{var}}` and the
//! `{{else}}` branch differently from the plain text substitution wanted here.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Prompt arguments keyed by name.
pub type PromptArgs = IndexMap<String, String>;

static IF_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#if (\w+)\}\}(.*?)(?:\{\{else\}\}(.*?))?\{\{/if\}\}")
        .expect("if-block pattern is valid")
});

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("variable pattern is valid"));

/// A name is truthy iff it is present with a non-empty value.
pub fn is_truthy(args: &PromptArgs, name: &str) -> bool {
    args.get(name).is_some_and(|v| !v.is_empty())
}

/// Render `template` against `args`.
///
/// Conditions are decided from `args` alone, before any variable is
/// substituted. Variables are then filled in a single pass, so substituted
/// values are never re-scanned for template syntax. Unresolved variables are
/// dropped and the result is trimmed.
pub fn render(template: &str, args: &PromptArgs) -> String {
    let selected = IF_BLOCK.replace_all(template, |caps: &Captures| {
        let branch = if is_truthy(args, &caps[1]) { caps.get(2) } else { caps.get(3) };
        branch.map(|m| m.as_str().to_string()).unwrap_or_default()
    });

    let filled = VARIABLE.replace_all(&selected, |caps: &Captures| {
        args.get(&caps[1]).cloned().unwrap_or_default()
    });

    filled.trim().to_string()
}
