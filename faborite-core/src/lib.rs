//! Faborite Core Library
//!
//! Shared pieces for the Faborite command-line tools: the error type,
//! configuration handling and the location of the per-user data directory.

pub mod config;
pub mod error;

pub use error::{Error, Result};

use std::path::PathBuf;

/// Faborite version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the per-user directory under the home directory
pub const ROOT_DIR_NAME: &str = ".faborite";

/// Resolve the default Faborite root (`~/.faborite`)
///
/// This is the only place the home directory is consulted. Callers at the
/// CLI boundary resolve it once and pass concrete paths down.
pub fn default_root() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(ROOT_DIR_NAME))
        .ok_or_else(|| Error::Config("Unable to determine the home directory".to_string()))
}
