//! Configuration loading and parsing

use anyhow::{Context, Result};
use calc_bridge::BridgeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub keypad: KeypadConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeypadConfig {
    /// Longest entry the keypad accepts
    #[serde(default = "default_max_digits")]
    pub max_digits: usize,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            max_digits: default_max_digits(),
        }
    }
}

fn default_max_digits() -> usize {
    10
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .bridge
        .validate()
        .with_context(|| format!("Invalid [bridge] section in {:?}", path))?;
    if config.keypad.max_digits == 0 {
        anyhow::bail!("keypad.max_digits must be at least 1 in {:?}", path);
    }

    Ok(config)
}
