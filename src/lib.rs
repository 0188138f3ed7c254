//! mcp-this - turn a declarative catalog of shell commands into callable tools
//!
//! A catalog (YAML or JSON) lists tools, each a shell command template with
//! `<<placeholders>>`, grouped optionally into toolsets, plus prompt templates.
//! This crate validates the catalog, synthesizes one handler per tool with an
//! explicit parameter signature, and runs commands on request. Prompts are
//! rendered with a small `{{var}}` / `{{#if}}` template language.
//!
//! The transport that exposes a [`Registry`] to clients is not part of this
//! crate.

pub mod config;
pub mod error;
pub mod prompt;
pub mod registry;
pub mod tools;

pub use error::{ConfigError, McpThisError, Result};
pub use registry::Registry;
