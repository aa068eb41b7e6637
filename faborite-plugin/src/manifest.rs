//! Manifest plugin format
//!
//! A manifest plugin is a TOML file in the plugin directory:
//!
//! ```toml
//! [plugin]
//! name = "hello"
//! version = "0.1.0"
//! description = "Greets people"
//!
//! [[register]]
//! name = "hello"
//! exec = ["echo", "Hello from custom plugin!"]
//! ```
//!
//! The `register` array is the registration entry point. A manifest without
//! it loads fine but contributes nothing.

use crate::command::handler;
use crate::error::{PluginError, Result};
use crate::exec::ExecHandler;
use crate::manager::PluginManager;
use crate::traits::{Plugin, PluginInfo};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw manifest document
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PluginManifest {
    /// Optional metadata
    #[serde(default)]
    pub plugin: Option<PluginMeta>,

    /// Registration entry point
    #[serde(default)]
    pub register: Option<Vec<CommandSpec>>,
}

/// `[plugin]` metadata table
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct PluginMeta {
    /// Plugin name (defaults to the file stem)
    pub name: Option<String>,
    /// Plugin version (defaults to `0.0.0`)
    pub version: Option<String>,
    /// Human readable description
    pub description: Option<String>,
}

/// One `[[register]]` entry
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommandSpec {
    /// Command name
    pub name: String,
    /// Program followed by its leading arguments
    pub exec: Vec<String>,
    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,
}

impl PluginManifest {
    /// Parse and validate manifest source
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| PluginError::Manifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        for spec in self.register.iter().flatten() {
            if spec.name.is_empty() || spec.name.contains(char::is_whitespace) {
                return Err(PluginError::Manifest(format!(
                    "invalid command name {:?}",
                    spec.name
                )));
            }
            match spec.exec.first() {
                Some(program) if !program.is_empty() => {}
                _ => {
                    return Err(PluginError::Manifest(format!(
                        "command '{}' has an empty exec",
                        spec.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A loaded manifest exposing a registration entry point
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    info: PluginInfo,
    commands: Vec<CommandSpec>,
    base_dir: PathBuf,
}

impl ManifestPlugin {
    /// Build from manifest source
    ///
    /// Returns `Ok(None)` when the manifest has no `register` entry point.
    pub fn from_source(stem: &str, content: &str, base_dir: &Path) -> Result<Option<Self>> {
        let manifest = PluginManifest::parse(content)?;
        let Some(commands) = manifest.register else {
            return Ok(None);
        };

        let meta = manifest.plugin.unwrap_or_default();
        let info = PluginInfo::new(
            meta.name.unwrap_or_else(|| stem.to_string()),
            meta.version.unwrap_or_else(|| "0.0.0".to_string()),
        )
        .with_description(meta.description.unwrap_or_default());

        Ok(Some(Self {
            info,
            commands,
            base_dir: base_dir.to_path_buf(),
        }))
    }

    /// Declared commands
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }
}

impl Plugin for ManifestPlugin {
    fn info(&self) -> PluginInfo {
        self.info.clone()
    }

    fn register(&self, manager: &mut PluginManager) -> Result<()> {
        for spec in &self.commands {
            let exec = ExecHandler::new(&spec.name, &spec.exec, &self.base_dir);
            manager.register_command(
                spec.name.clone(),
                handler(move |args| exec.run(args).map_err(Into::into)),
            );
        }
        Ok(())
    }
}
