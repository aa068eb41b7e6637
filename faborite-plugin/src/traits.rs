//! Plugin traits

use crate::error::Result;
use crate::manager::PluginManager;

/// Plugin information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plugin name
    pub name: String,
    /// Plugin version
    pub version: String,
    /// Plugin description
    pub description: String,
}

impl PluginInfo {
    /// Create plugin information with an empty description
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Main plugin trait
///
/// Plugins run with full trust: `register` receives the manager mutably and
/// may do anything, though the expected effect is a series of
/// [`PluginManager::register_command`] calls. There is no sandbox and no
/// permission model.
pub trait Plugin {
    /// Get plugin information
    fn info(&self) -> PluginInfo;

    /// Registration entry point
    fn register(&self, manager: &mut PluginManager) -> Result<()>;
}
