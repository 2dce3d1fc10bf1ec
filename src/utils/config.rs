//! Configuration file discovery and loading.
//!
//! Lookup order: an explicit path, then `<config dir>/trindex/config.json`,
//! then built-in defaults.

use crate::error::{IndexError, Result};
use crate::index::types::IndexConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "trindex";
const CONFIG_FILE: &str = "config.json";

/// Default location of the config file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Load configuration, falling back to defaults when no file exists.
///
/// An explicit path that does not exist is an error; a missing default
/// file is not.
pub fn load_config(path: Option<&Path>) -> Result<IndexConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.is_file() => p,
            _ => {
                debug!("no config file found, using defaults");
                return Ok(IndexConfig::default());
            }
        },
    };

    let config = read_config(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn read_config(path: &Path) -> Result<IndexConfig> {
    let content = fs::read_to_string(path)?;
    let config: IndexConfig = serde_json::from_str(&content)
        .map_err(|e| IndexError::Config(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}
