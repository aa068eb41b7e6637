//! REPL session state

/// Whether the loop is accepting input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    Running,
    #[default]
    Stopped,
}

/// In-memory session: history plus run state
///
/// History only grows and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ReplSession {
    history: Vec<String>,
    state: SessionState,
}

impl ReplSession {
    /// Create a stopped session with empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session as running
    pub fn start(&mut self) {
        self.state = SessionState::Running;
    }

    /// Mark the session as stopped
    pub fn stop(&mut self) {
        self.state = SessionState::Stopped;
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the loop is running
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Append a line to history
    pub fn record(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
    }

    /// Recorded lines, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// History formatted one entry per line, 1-indexed
    pub fn format_history(&self) -> Vec<String> {
        self.history
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:3}  {}", i + 1, line))
            .collect()
    }
}
