//! Input parsing
//!
//! Lines are trimmed and split on whitespace. There is no quoting or
//! escaping.

/// A line split into command and positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// First token
    pub command: String,
    /// Remaining tokens
    pub args: Vec<String>,
}

impl ParsedLine {
    /// Tokenize a line; `None` if it has no tokens
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let command = tokens.next()?;
        Some(Self {
            command,
            args: tokens.collect(),
        })
    }
}

/// Built-in REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltinCommand {
    /// `sync [workspace] [lakehouse]`
    Sync {
        workspace: Option<String>,
        lakehouse: Option<String>,
    },
    /// `list [workspace] [lakehouse]`
    List {
        workspace: Option<String>,
        lakehouse: Option<String>,
    },
    /// `profile [table]`
    Profile { table: Option<String> },
    /// Anything else
    Unknown(String),
}

impl BuiltinCommand {
    /// Parse a built-in command from tokens
    pub fn from_parsed(parsed: ParsedLine) -> Self {
        let ParsedLine { command, args } = parsed;
        let mut args = args.into_iter();

        match command.as_str() {
            "sync" => Self::Sync {
                workspace: args.next(),
                lakehouse: args.next(),
            },
            "list" => Self::List {
                workspace: args.next(),
                lakehouse: args.next(),
            },
            "profile" => Self::Profile { table: args.next() },
            _ => Self::Unknown(command),
        }
    }

    /// Acknowledgment text for this command
    ///
    /// These are descriptive only; no sync, listing or profiling happens.
    pub fn describe(&self) -> String {
        match self {
            Self::Sync {
                workspace,
                lakehouse,
            } => format!(
                "Triggering sync for workspace: {}{}",
                workspace.as_deref().unwrap_or("default"),
                lakehouse_suffix(lakehouse)
            ),
            Self::List {
                workspace,
                lakehouse,
            } => format!(
                "Listing tables in workspace: {}{}",
                workspace.as_deref().unwrap_or("default"),
                lakehouse_suffix(lakehouse)
            ),
            Self::Profile { table } => {
                format!("Profiling table: {}", table.as_deref().unwrap_or("unknown"))
            }
            Self::Unknown(command) => format!("Unknown command: {}", command),
        }
    }
}

fn lakehouse_suffix(lakehouse: &Option<String>) -> String {
    lakehouse
        .as_deref()
        .map(|lh| format!(" (lakehouse: {})", lh))
        .unwrap_or_default()
}

/// Classified input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line
    Empty,
    /// `exit`
    Exit,
    /// `help`
    Help,
    /// `history`
    History,
    /// Anything to evaluate
    Command(BuiltinCommand),
}

impl Input {
    /// Classify a raw line
    ///
    /// Control words must match the whole trimmed line exactly.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "exit" => Self::Exit,
            "help" => Self::Help,
            "history" => Self::History,
            _ => match ParsedLine::parse(line) {
                Some(parsed) => Self::Command(BuiltinCommand::from_parsed(parsed)),
                None => Self::Empty,
            },
        }
    }
}
