//! Configuration directory resolution and TOML helpers
//!
//! Config files live under one directory, resolved in priority order:
//! 1. `AMPM_CONFIG_DIR` environment variable
//! 2. OS config directory (`~/.config/ampm` on Linux)
//! 3. `./ampm_config` fallback when the OS directory cannot be determined

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_ENV: &str = "AMPM_CONFIG_DIR";

/// Resolve the AMPM configuration directory.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::config_dir()
        .map(|d| d.join("ampm"))
        .unwrap_or_else(|| PathBuf::from("./ampm_config"))
}

/// Path of a named config file inside the AMPM config directory.
pub fn config_file_path(file_name: &str) -> PathBuf {
    config_dir().join(file_name)
}

/// Read and parse a TOML config file.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}

/// Serialize a value to TOML and write it, creating parent directories as needed.
pub fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(value)
        .map_err(|e| Error::Config(format!("failed to serialize {}: {}", path.display(), e)))?;
    std::fs::write(path, content)?;
    Ok(())
}
