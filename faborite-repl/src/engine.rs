//! REPL engine

use crate::ReplConfig;
use crate::command::{BuiltinCommand, Input};
use crate::error::ReplError;
use crate::session::ReplSession;
use crate::source::{LineSource, ReadOutcome};
use std::io::{ErrorKind, Write};

/// Fixed help text
pub const HELP_TEXT: &str = "\
Available commands:
  sync <workspace> <lakehouse>  - Trigger a sync operation
  list <workspace> <lakehouse>  - List tables
  profile <table>               - Profile a table
  history                       - Show command history
  help                          - Show this help
  exit                          - Exit REPL";

/// Evaluates built-in commands
pub trait Evaluator {
    /// Produce the output for a command; `Ok(None)` prints nothing
    fn eval(&mut self, command: &BuiltinCommand) -> Result<Option<String>, ReplError>;
}

impl<F> Evaluator for F
where
    F: FnMut(&BuiltinCommand) -> Result<Option<String>, ReplError>,
{
    fn eval(&mut self, command: &BuiltinCommand) -> Result<Option<String>, ReplError> {
        self(command)
    }
}

/// Default evaluator printing the acknowledgment for each command
#[derive(Debug, Clone, Copy, Default)]
pub struct StubEvaluator;

impl Evaluator for StubEvaluator {
    fn eval(&mut self, command: &BuiltinCommand) -> Result<Option<String>, ReplError> {
        Ok(Some(command.describe()))
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user typed `exit`
    Command,
    /// The input stream ended
    EndOfInput,
}

/// Read-eval-print loop
pub struct Repl<S, E = StubEvaluator> {
    source: S,
    evaluator: E,
    config: ReplConfig,
    session: ReplSession,
}

impl<S: LineSource> Repl<S> {
    /// Create a REPL with the default evaluator
    pub fn new(source: S, config: ReplConfig) -> Self {
        Self::with_evaluator(source, StubEvaluator, config)
    }
}

impl<S: LineSource, E: Evaluator> Repl<S, E> {
    /// Create a REPL with a custom evaluator
    pub fn with_evaluator(source: S, evaluator: E, config: ReplConfig) -> Self {
        Self {
            source,
            evaluator,
            config,
            session: ReplSession::new(),
        }
    }

    /// Session state and history
    pub fn session(&self) -> &ReplSession {
        &self.session
    }

    /// Line source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run until `exit` or end of input
    ///
    /// Results, help and history go to `out`; evaluation errors go to `err`
    /// and never end the loop. Interrupts print a hint and continue.
    pub fn run<O: Write, W: Write>(
        &mut self,
        out: &mut O,
        err: &mut W,
    ) -> Result<ExitReason, ReplError> {
        self.session.start();
        let result = self.run_loop(out, err);
        self.session.stop();
        out.flush()?;
        result
    }

    fn run_loop<O: Write, W: Write>(
        &mut self,
        out: &mut O,
        err: &mut W,
    ) -> Result<ExitReason, ReplError> {
        if self.config.banner {
            writeln!(out, "Faborite Interactive REPL")?;
            writeln!(out, "Type 'help' for commands, 'exit' to quit")?;
            writeln!(out)?;
        }

        loop {
            let line = match self.source.read_line(&self.config.prompt) {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted) => {
                    writeln!(out, "\nUse 'exit' to quit")?;
                    continue;
                }
                Ok(ReadOutcome::Eof) => {
                    tracing::debug!("End of input, leaving REPL");
                    return Ok(ExitReason::EndOfInput);
                }
                // The offending line is already consumed; keep reading.
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    writeln!(err, "Error: {}", e)?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let line = line.trim();

            match Input::parse(line) {
                Input::Empty => {}
                Input::Exit => return Ok(ExitReason::Command),
                Input::Help => writeln!(out, "{}", HELP_TEXT)?,
                Input::History => {
                    for entry in self.session.format_history() {
                        writeln!(out, "{}", entry)?;
                    }
                }
                Input::Command(command) => {
                    match self.evaluator.eval(&command) {
                        Ok(Some(output)) => writeln!(out, "{}", output)?,
                        Ok(None) => {}
                        Err(e) => writeln!(err, "Error: {}", e)?,
                    }
                    self.session.record(line);
                }
            }
        }
    }
}
