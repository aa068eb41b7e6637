//! Configuration management

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{FaboriteConfig, LoggingConfig, PluginsConfig, ReplSettings};

/// Default configuration file name inside the Faborite root
pub const CONFIG_FILE_NAME: &str = "config.toml";
