//! Faborite Plugin System
//!
//! Extends the CLI with externally authored commands. Plugins are either
//! compiled in (anything implementing [`Plugin`]) or discovered as manifest
//! files in the plugin directory, whose commands run as subprocesses.

mod command;
mod error;
mod exec;
mod loader;
mod manager;
mod manifest;
mod registry;
mod traits;

pub use command::{CommandArgs, Handler, HandlerError, HandlerResult, handler};
pub use error::{PluginError, Result};
pub use exec::{ExecError, ExecHandler};
pub use loader::{LoadOutcome, LoadReport, PluginLoader, PluginUnit};
pub use manager::PluginManager;
pub use manifest::{CommandSpec, ManifestPlugin, PluginManifest, PluginMeta};
pub use registry::CommandRegistry;
pub use traits::{Plugin, PluginInfo};
