//! Catalog loading
//!
//! Resolves where a catalog comes from and parses it into a raw
//! `serde_json::Value`. The result is unvalidated; callers pass it through
//! [`validate_catalog`](super::validate_catalog) before building anything.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ConfigError;

/// Environment variable naming a catalog file.
pub const CONFIG_PATH_ENV: &str = "MCP_THIS_CONFIG_PATH";

/// Where a catalog is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// YAML (or JSON) file on disk
    File(PathBuf),
    /// JSON document passed inline
    Inline(String),
}

impl CatalogSource {
    /// Read and parse the catalog.
    pub fn load(&self) -> Result<Value, ConfigError> {
        match self {
            Self::File(path) => load_file(path),
            Self::Inline(value) => parse_inline(value),
        }
    }
}

/// Resolves a [`CatalogSource`] from explicit arguments, the environment, and
/// default locations, in that order.
#[derive(Debug, Clone, Default)]
pub struct CatalogLocator {
    path: Option<PathBuf>,
    inline: Option<String>,
    env_path: Option<PathBuf>,
    defaults: Vec<PathBuf>,
}

impl CatalogLocator {
    /// Locator seeded from `MCP_THIS_CONFIG_PATH` and the standard locations.
    pub fn new() -> Self {
        Self {
            env_path: std::env::var_os(CONFIG_PATH_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            defaults: default_config_paths(),
            ..Self::default()
        }
    }

    /// Use an explicit catalog file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Use an inline JSON catalog.
    pub fn with_inline(mut self, value: impl Into<String>) -> Self {
        self.inline = Some(value.into());
        self
    }

    /// Override the environment-provided path.
    pub fn with_env_path(mut self, path: Option<PathBuf>) -> Self {
        self.env_path = path;
        self
    }

    /// Override the default search locations.
    pub fn with_defaults(mut self, defaults: Vec<PathBuf>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Pick the source to load.
    ///
    /// An explicit path or inline value always wins, even if it turns out to
    /// be unreadable; default locations are only used when they exist.
    pub fn locate(&self) -> Result<CatalogSource, ConfigError> {
        if let Some(path) = &self.path {
            return Ok(CatalogSource::File(path.clone()));
        }
        if let Some(inline) = &self.inline {
            return Ok(CatalogSource::Inline(inline.clone()));
        }
        if let Some(path) = &self.env_path {
            return Ok(CatalogSource::File(path.clone()));
        }
        self.defaults
            .iter()
            .find(|p| p.is_file())
            .map(|p| CatalogSource::File(p.clone()))
            .ok_or(ConfigError::NotProvided)
    }

    /// Locate and load in one step.
    pub fn load(&self) -> Result<Value, ConfigError> {
        let source = self.locate()?;
        log::info!("Loading catalog from {:?}", source);
        source.load()
    }
}

/// Standard catalog locations, most specific first.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("mcp-this").join("config.yaml"));
    }
    paths.push(PathBuf::from("/etc/mcp-this/config.yaml"));
    paths
}

fn load_file(path: &Path) -> Result<Value, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;

    if is_blank_yaml(&content) {
        return Err(ConfigError::EmptyFile(path.display().to_string()));
    }

    let value: Value = serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;

    if value.is_null() {
        return Err(ConfigError::EmptyFile(path.display().to_string()));
    }

    Ok(value)
}

fn parse_inline(value: &str) -> Result<Value, ConfigError> {
    let parsed: Value = serde_json::from_str(value).map_err(|e| ConfigError::Json(e.to_string()))?;

    let empty = match &parsed {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return Err(ConfigError::EmptyValue);
    }

    Ok(parsed)
}

fn is_blank_yaml(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
