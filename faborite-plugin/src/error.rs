//! Plugin error types

use crate::command::HandlerError;
use thiserror::Error;

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors raised by the plugin system
#[derive(Debug, Error)]
pub enum PluginError {
    /// A plugin unit could not be loaded or its registration failed
    #[error("Failed to load plugin {plugin}: {reason}")]
    Load { plugin: String, reason: String },

    /// The manifest could not be parsed or is invalid
    #[error("Invalid plugin manifest: {0}")]
    Manifest(String),

    /// No command with this name is registered
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The handler of a command failed; the handler's error is kept as-is
    #[error("{0}")]
    Handler(HandlerError),

    /// Installing a plugin unit failed
    #[error("Failed to install plugin: {0}")]
    Install(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PluginError {
    /// Build a load error for the named unit
    pub fn load(plugin: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            plugin: plugin.into(),
            reason: reason.to_string(),
        }
    }

    /// Take the handler's original error out, if this is a handler failure
    pub fn into_handler_error(self) -> Option<HandlerError> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }
}
