//! Plugin loader
//!
//! Discovers manifest files in the plugin directory and runs their
//! registration entry points against a [`PluginManager`].

use crate::error::{PluginError, Result};
use crate::manager::PluginManager;
use crate::manifest::ManifestPlugin;
use crate::traits::Plugin;
use std::path::{Path, PathBuf};

/// Default plugin file extension
pub const DEFAULT_EXTENSION: &str = "toml";

/// A discovered plugin file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginUnit {
    /// File name without extension
    pub stem: String,
    /// Full path to the file
    pub path: PathBuf,
}

/// Outcome of loading one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Entry point ran and declared this many commands
    Registered { commands: usize },
    /// Unit has no entry point
    Skipped,
}

/// Summary of a full load pass
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Units whose entry point ran
    pub loaded: Vec<String>,
    /// Units without an entry point
    pub skipped: Vec<String>,
    /// Units that failed, with the reason
    pub failed: Vec<(String, PluginError)>,
}

impl LoadReport {
    /// Whether every unit loaded without error
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Plugin loader
#[derive(Debug, Clone)]
pub struct PluginLoader {
    dir: PathBuf,
    extension: String,
}

impl PluginLoader {
    /// Create a loader for `dir`, matching files with `extension`
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Plugin directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Plugin file extension
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Create the plugin directory (and parents) if missing
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.is_dir() {
            tracing::info!("📁 Creating plugin directory {}", self.dir.display());
        }
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Enumerate plugin files directly inside the plugin directory
    ///
    /// Order follows the file system and is not sorted.
    pub fn discover(&self) -> Result<Vec<PluginUnit>> {
        self.ensure_dir()?;

        let mut units = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };
            if !path.is_file() || !self.matches(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            units.push(PluginUnit {
                stem: stem.to_string(),
                path,
            });
        }

        tracing::debug!("Discovered {} plugin(s) in {}", units.len(), self.dir.display());
        Ok(units)
    }

    /// Read and parse a unit
    ///
    /// `Ok(None)` means the unit parsed but has no registration entry point.
    pub fn load(&self, unit: &PluginUnit) -> Result<Option<ManifestPlugin>> {
        let content = std::fs::read_to_string(&unit.path)
            .map_err(|e| PluginError::load(&unit.stem, e))?;
        ManifestPlugin::from_source(&unit.stem, &content, &self.dir)
            .map_err(|e| PluginError::load(&unit.stem, e))
    }

    /// Load a unit and run its entry point against `manager`
    pub fn load_and_register(
        &self,
        unit: &PluginUnit,
        manager: &mut PluginManager,
    ) -> Result<LoadOutcome> {
        let Some(plugin) = self.load(unit)? else {
            tracing::debug!("Plugin {} has no register entry, skipping", unit.stem);
            return Ok(LoadOutcome::Skipped);
        };

        plugin
            .register(manager)
            .map_err(|e| PluginError::load(&unit.stem, e))?;

        Ok(LoadOutcome::Registered {
            commands: plugin.commands().len(),
        })
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("plugins");
        let loader = PluginLoader::new(&dir, DEFAULT_EXTENSION);

        assert!(loader.discover().unwrap().is_empty());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_discover_filters_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("hello.toml"), "").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(tmp.path().join("sub.toml")).unwrap();
        std::fs::create_dir(tmp.path().join("nested")).unwrap();
        std::fs::write(tmp.path().join("nested").join("deep.toml"), "").unwrap();

        let loader = PluginLoader::new(tmp.path(), DEFAULT_EXTENSION);
        let units = loader.discover().unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].stem, "hello");
        assert_eq!(units[0].path, tmp.path().join("hello.toml"));
    }

    #[test]
    fn test_load_reports_stem_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.toml");
        std::fs::write(&path, "register = [").unwrap();

        let loader = PluginLoader::new(tmp.path(), DEFAULT_EXTENSION);
        let unit = PluginUnit {
            stem: "broken".to_string(),
            path,
        };
        match loader.load(&unit) {
            Err(PluginError::Load { plugin, .. }) => assert_eq!(plugin, "broken"),
            other => panic!("unexpected result: {:?}", other.map(|p| p.is_some())),
        }
    }

    #[test]
    fn test_load_and_register() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hello.toml");
        std::fs::write(
            &path,
            r#"
                [[register]]
                name = "hello"
                exec = ["echo", "hi"]
            "#,
        )
        .unwrap();

        let loader = PluginLoader::new(tmp.path(), DEFAULT_EXTENSION);
        let mut manager = PluginManager::with_loader(loader.clone());
        let unit = PluginUnit {
            stem: "hello".to_string(),
            path,
        };

        let outcome = loader.load_and_register(&unit, &mut manager).unwrap();
        assert_eq!(outcome, LoadOutcome::Registered { commands: 1 });
        assert_eq!(manager.list_registered(), vec!["hello"]);
    }
}
