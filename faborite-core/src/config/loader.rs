//! Configuration loader

use crate::config::FaboriteConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Configuration loader for the supported formats
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<FaboriteConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| {
                Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::from_json(&content),
            "toml" | "" => Self::from_toml(&content),
            _ => Err(Error::Config(format!("Unknown config format: {}", ext))),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<FaboriteConfig> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(FaboriteConfig::default());
        }
        Self::load(path)
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<FaboriteConfig> {
        serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<FaboriteConfig> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}
