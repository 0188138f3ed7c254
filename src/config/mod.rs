//! Catalog configuration.
//!
//! Two concerns live here:
//! 1. Locating and parsing a catalog (explicit file, inline JSON,
//!    `MCP_THIS_CONFIG_PATH`, or a default location)
//! 2. Validating its shape before anything is built from it

pub use self::loader::{CONFIG_PATH_ENV, CatalogLocator, CatalogSource, default_config_paths};
pub use self::validate::{ValidationMode, is_identifier, validate_catalog};

mod loader;
mod validate;

use serde_json::Value;

use crate::error::ConfigError;

/// Load a catalog through `locator` and validate it.
pub fn load_catalog(locator: &CatalogLocator, mode: ValidationMode) -> Result<Value, ConfigError> {
    let catalog = locator.load()?;
    validate_catalog(&catalog, mode)?;
    Ok(catalog)
}
