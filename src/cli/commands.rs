//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - check: validate a catalog and report skipped tools
//! - list: list tools and prompts
//! - call: invoke a tool
//! - prompt: render a prompt

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// mcp-this - expose shell commands from a catalog as tools
#[derive(Parser, Debug)]
#[command(name = "mcp-this")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (YAML or JSON)
    #[arg(short, long, global = true, conflicts_with = "config_value")]
    pub config: Option<PathBuf>,

    /// Inline JSON catalog
    #[arg(long, global = true)]
    pub config_value: Option<String>,

    /// Only read the top-level `tools` section
    #[arg(long, global = true)]
    pub top_level_only: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the catalog and report tools that could not be built
    Check,

    /// List registered tools and prompts
    List {
        /// Include full tool descriptions
        #[arg(short, long)]
        detailed: bool,
    },

    /// Invoke a tool and print its output
    Call {
        /// Tool name
        tool: String,

        /// Tool argument as key=value (repeatable)
        #[arg(short = 'a', long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },

    /// Render a prompt
    Prompt {
        /// Prompt name
        name: String,

        /// Prompt argument as key=value (repeatable)
        #[arg(short = 'a', long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Collect `key=value` pairs into a JSON argument bag. Later pairs win.
pub fn args_to_json(args: &[(String, String)]) -> Value {
    let map: Map<String, Value> = args
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(map)
}
