//! Plugin manager

use crate::command::{CommandArgs, Handler};
use crate::error::{PluginError, Result};
use crate::loader::{DEFAULT_EXTENSION, LoadOutcome, LoadReport, PluginLoader};
use crate::manifest::PluginManifest;
use crate::registry::CommandRegistry;
use crate::traits::Plugin;
use std::path::{Path, PathBuf};

/// Owns the command registry and drives plugin loading
///
/// The plugin directory is passed in by the caller; the manager never looks
/// up the home directory itself.
#[derive(Debug)]
pub struct PluginManager {
    registry: CommandRegistry,
    loader: PluginLoader,
}

impl PluginManager {
    /// Create a manager for `plugin_dir` using the default extension
    pub fn new(plugin_dir: impl Into<PathBuf>) -> Self {
        Self::with_loader(PluginLoader::new(plugin_dir, DEFAULT_EXTENSION))
    }

    /// Create a manager around an existing loader
    pub fn with_loader(loader: PluginLoader) -> Self {
        Self {
            registry: CommandRegistry::new(),
            loader,
        }
    }

    /// Plugin directory
    pub fn plugin_dir(&self) -> &Path {
        self.loader.dir()
    }

    /// Discover every unit and run its entry point
    ///
    /// A failing unit is logged and recorded in the report; the remaining
    /// units still load. Only an unreadable plugin directory is an error.
    pub fn load_all(&mut self) -> Result<LoadReport> {
        let loader = self.loader.clone();
        let mut report = LoadReport::default();

        for unit in loader.discover()? {
            match loader.load_and_register(&unit, self) {
                Ok(LoadOutcome::Registered { .. }) => {
                    tracing::info!("Loaded plugin: {}", unit.stem);
                    report.loaded.push(unit.stem);
                }
                Ok(LoadOutcome::Skipped) => report.skipped.push(unit.stem),
                Err(e) => {
                    tracing::error!("{}", e);
                    report.failed.push((unit.stem, e));
                }
            }
        }

        Ok(report)
    }

    /// Run the entry point of a compiled-in plugin
    ///
    /// Failures are logged and returned; commands registered before the
    /// failure stay registered.
    pub fn register_plugin(&mut self, plugin: &dyn Plugin) -> Result<()> {
        let info = plugin.info();
        match plugin.register(self) {
            Ok(()) => {
                tracing::info!("Loaded plugin: {} v{}", info.name, info.version);
                Ok(())
            }
            Err(e) => {
                let err = PluginError::load(info.name, e);
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }

    /// Register a command; an existing command of the same name is replaced
    pub fn register_command(&mut self, name: impl Into<String>, handler: Handler) {
        self.registry.register(name, handler);
    }

    /// Execute a registered command
    ///
    /// Handler errors come back as [`PluginError::Handler`] holding the
    /// handler's own error.
    pub fn execute(&self, name: &str, args: &CommandArgs) -> Result<Option<String>> {
        let handler = self
            .registry
            .lookup(name)
            .ok_or_else(|| PluginError::UnknownCommand(name.to_string()))?;
        handler(args).map_err(PluginError::Handler)
    }

    /// Registered command names in insertion order
    pub fn list_registered(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Check whether a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no command is registered
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Copy a manifest file into the plugin directory
    ///
    /// The file is validated first and stored as `<stem>.<extension>`. It is
    /// not loaded into this manager.
    pub fn install(&self, source: impl AsRef<Path>) -> Result<PathBuf> {
        let source = source.as_ref();
        let content = std::fs::read_to_string(source)
            .map_err(|e| PluginError::Install(format!("{}: {}", source.display(), e)))?;
        PluginManifest::parse(&content)
            .map_err(|e| PluginError::Install(format!("{}: {}", source.display(), e)))?;

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                PluginError::Install(format!("{}: invalid file name", source.display()))
            })?;

        self.loader.ensure_dir()?;
        let dest = self
            .loader
            .dir()
            .join(format!("{}.{}", stem, self.loader.extension()));
        if dest.exists() {
            tracing::warn!("Replacing installed plugin {}", dest.display());
        }
        std::fs::write(&dest, content)?;

        tracing::info!("📦 Installed plugin {} to {}", stem, dest.display());
        Ok(dest)
    }
}
