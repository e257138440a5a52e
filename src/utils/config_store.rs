//! ConfigStore - Relay Configuration Loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::domain::config::RelayConfig;
use crate::error::{Error, Result};
use crate::helpers::config_dir;

/// Resolve the config file path: `$SWITCH_RELAY_CONFIG`, else `relay.toml`
/// in the platform config directory
pub fn config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_dir()?.join(CONFIG_FILE_NAME)),
    }
}

/// Load the relay config from the resolved path
pub fn load_relay_config() -> Result<RelayConfig> {
    let path = config_path()?;
    load_config_from(&path)
}

/// Load a TOML config file; a missing file yields the defaults
pub fn load_config_from(path: &Path) -> Result<RelayConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(RelayConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(RelayConfig::default());
    }

    let config: RelayConfig = toml::from_str(&content)?;
    if config.endpoint.host.trim().is_empty() {
        return Err(Error::Invalid {
            message: format!("endpoint.host is empty in {}", path.display()),
        });
    }

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
