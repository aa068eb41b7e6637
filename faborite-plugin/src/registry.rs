//! Command registry

use crate::command::Handler;
use std::collections::HashMap;

/// Mapping from command name to handler
///
/// Names are unique. Listing follows first-insertion order; registering an
/// existing name replaces its handler in place.
pub struct CommandRegistry {
    handlers: HashMap<String, Handler>,
    order: Vec<String>,
}

impl CommandRegistry {
    /// Create a new command registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a command, replacing any handler already bound to `name`
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        let name = name.into();
        tracing::info!("Registered command: {}", name);
        if self.handlers.insert(name.clone(), handler).is_none() {
            self.order.push(name);
        }
    }

    /// Look up a command handler by name
    pub fn lookup(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).cloned()
    }

    /// Check whether a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// All registered names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no command is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.order)
            .finish()
    }
}
