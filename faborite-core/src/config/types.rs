//! Configuration type definitions
//!
//! These types represent the user configuration for Faborite.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration for Faborite
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FaboriteConfig {
    /// Plugin configuration
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Interactive REPL configuration
    #[serde(default)]
    pub repl: ReplSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Plugin discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginsConfig {
    /// Plugin directory (default: `<root>/plugins`)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// File extension identifying plugin units
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
        }
    }
}

impl PluginsConfig {
    /// Resolve the plugin directory against the Faborite root
    pub fn resolve_dir(&self, root: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => root.join(dir),
            None => root.join("plugins"),
        }
    }
}

fn default_extension() -> String {
    "toml".to_string()
}

/// REPL configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplSettings {
    /// Prompt string
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Print the welcome banner on start
    #[serde(default = "default_true")]
    pub banner: bool,
}

impl Default for ReplSettings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            banner: true,
        }
    }
}

fn default_prompt() -> String {
    "faborite> ".to_string()
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
