//! Command handler types

use std::collections::BTreeMap;
use std::sync::Arc;

/// Error produced by a command handler
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of invoking a command handler
pub type HandlerResult = std::result::Result<Option<String>, HandlerError>;

/// Shared command handler
pub type Handler = Arc<dyn Fn(&CommandArgs) -> HandlerResult + Send + Sync>;

/// Wrap a closure as a [`Handler`]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&CommandArgs) -> HandlerResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Arguments captured at dispatch time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    /// Positional arguments, in order
    pub positional: Vec<String>,
    /// Named arguments
    pub named: BTreeMap<String, String>,
}

impl CommandArgs {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from positional arguments only
    pub fn positional<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: args.into_iter().map(Into::into).collect(),
            named: BTreeMap::new(),
        }
    }

    /// Add a named argument
    pub fn with_named(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Get a positional argument
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Get a named argument
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }
}
