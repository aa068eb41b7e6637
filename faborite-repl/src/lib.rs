//! Interactive REPL for Faborite
//!
//! A small read-eval-print loop over a fixed set of built-in commands
//! (`sync`, `list`, `profile`) plus the control words `help`, `history` and
//! `exit`. It knows nothing about plugin commands.

pub mod command;
pub mod engine;
pub mod error;
pub mod session;
pub mod source;

pub use command::{BuiltinCommand, Input, ParsedLine};
pub use engine::{Evaluator, ExitReason, HELP_TEXT, Repl, StubEvaluator};
pub use error::ReplError;
pub use session::{ReplSession, SessionState};
pub use source::{EditorSource, LineSource, ReadOutcome, ScriptedSource, StdinSource};

use faborite_core::config::ReplSettings;

/// REPL configuration
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string
    pub prompt: String,
    /// Print the welcome banner on start
    pub banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self::from(&ReplSettings::default())
    }
}

impl From<&ReplSettings> for ReplConfig {
    fn from(settings: &ReplSettings) -> Self {
        Self {
            prompt: settings.prompt.clone(),
            banner: settings.banner,
        }
    }
}
