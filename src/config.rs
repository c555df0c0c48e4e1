//! Configuration management
//!
//! Optional TOML file passed with `--config`. Every section and field has a
//! default, so a partial or empty file is valid; without a file the binary
//! runs on `Config::default()`.

use crate::constants::DEFAULT_BUFFER_SIZE;
use crate::error::{Jt905Error, Result};
use crate::writer::EscapeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub writer: WriterConfig,
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Destination buffer size in bytes (payload plus escaped copy)
    pub buffer_size: usize,
    /// Escape transform applied to built frames
    pub escape: EscapeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Default tracing filter when `--verbose` is not given
    pub level: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            escape: EscapeMode::Body,
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Parse config from TOML text
pub fn from_toml_str(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| Jt905Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = from_toml_str(&content).map_err(|e| Jt905Error::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
