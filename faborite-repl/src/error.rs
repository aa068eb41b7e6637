//! REPL error types

use thiserror::Error;

/// Errors raised while running the REPL
#[derive(Debug, Error)]
pub enum ReplError {
    /// Reading input or writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The line editor could not be set up
    #[error("Line editor error: {0}")]
    Editor(String),

    /// A command failed to evaluate
    #[error("{0}")]
    Eval(String),
}
