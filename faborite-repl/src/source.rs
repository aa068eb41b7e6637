//! Line sources
//!
//! The REPL reads through [`LineSource`] so it can run against a terminal,
//! piped stdin, or a scripted list of lines.

use crate::error::ReplError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Result of one read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input, possibly with surrounding whitespace
    Line(String),
    /// Interrupt from the terminal (Ctrl-C)
    Interrupted,
    /// End of input (Ctrl-D or closed stream)
    Eof,
}

/// Producer of input lines
pub trait LineSource {
    /// Show `prompt` and block until the next line is available
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome>;
}

/// Interactive terminal source backed by rustyline
///
/// Keeps an in-memory history for arrow-key recall; nothing is written to
/// disk.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    /// Create an editor on the controlling terminal
    pub fn new() -> Result<Self, ReplError> {
        let editor = DefaultEditor::new().map_err(|e| ReplError::Editor(e.to_string()))?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!("Failed to add history entry: {}", e);
                    }
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }
}

/// Source for non-interactive input such as a pipe
///
/// The prompt is written to `prompt_out` before each read.
pub struct StdinSource<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> StdinSource<R, W> {
    /// Create a source from a reader and a prompt writer
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl StdinSource<io::StdinLock<'static>, io::Stdout> {
    /// Read from the process stdin, prompting on stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineSource for StdinSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(ReadOutcome::Eof);
        }
        Ok(ReadOutcome::Line(line))
    }
}

/// Pre-recorded input, mostly for tests
///
/// Yields [`ReadOutcome::Eof`] once the script is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<ReadOutcome>,
    prompts: Vec<String>,
}

impl ScriptedSource {
    /// Script made of plain lines
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_outcomes(lines.into_iter().map(|line| ReadOutcome::Line(line.into())))
    }

    /// Script made of arbitrary outcomes
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ReadOutcome>,
    {
        Self {
            script: outcomes.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, one per read
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Outcomes not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self.script.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdin_source() {
        let input = io::Cursor::new("sync a\n  list  \nlast");
        let mut prompts = Vec::new();
        let mut source = StdinSource::new(input, &mut prompts);

        assert_eq!(source.read_line("> ").unwrap(), ReadOutcome::Line("sync a\n".to_string()));
        assert_eq!(source.read_line("> ").unwrap(), ReadOutcome::Line("  list  \n".to_string()));
        assert_eq!(source.read_line("> ").unwrap(), ReadOutcome::Line("last".to_string()));
        assert_eq!(source.read_line("> ").unwrap(), ReadOutcome::Eof);
        drop(source);
        assert_eq!(String::from_utf8(prompts).unwrap(), "> > > > ");
    }

    #[test]
    fn test_scripted_source() {
        let mut source = ScriptedSource::from_outcomes([
            ReadOutcome::Line("a".to_string()),
            ReadOutcome::Interrupted,
        ]);
        assert_eq!(source.read_line("p1").unwrap(), ReadOutcome::Line("a".to_string()));
        assert_eq!(source.read_line("p2").unwrap(), ReadOutcome::Interrupted);
        assert_eq!(source.read_line("p3").unwrap(), ReadOutcome::Eof);
        assert_eq!(source.prompts(), ["p1", "p2", "p3"]);
        assert_eq!(source.remaining(), 0);
    }
}
