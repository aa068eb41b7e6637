//! Subprocess command handlers

use crate::command::CommandArgs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Prefix of the environment variables carrying named arguments
pub const NAMED_ARG_PREFIX: &str = "FABORITE_ARG_";

/// Subprocess handler failures
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to run command '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("command '{command}' failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Runs a declared program for a manifest command
#[derive(Debug, Clone)]
pub struct ExecHandler {
    command: String,
    program: PathBuf,
    args: Vec<String>,
}

impl ExecHandler {
    /// Create a handler from an `exec` list
    ///
    /// A program given as `./x` or `../x` is resolved against `base_dir`.
    pub fn new(command: &str, exec: &[String], base_dir: &Path) -> Self {
        let (program, args): (&str, &[String]) = match exec.split_first() {
            Some((program, rest)) => (program.as_str(), rest),
            None => ("", &[]),
        };
        let program = if program.starts_with("./") || program.starts_with("../") {
            base_dir.join(program)
        } else {
            PathBuf::from(program)
        };

        Self {
            command: command.to_string(),
            program,
            args: args.to_vec(),
        }
    }

    /// Resolved program path
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the program with the dispatch-time arguments
    ///
    /// Positional arguments follow the declared ones; named arguments become
    /// `FABORITE_ARG_<KEY>` environment variables. Trimmed stdout is the
    /// result, with empty output meaning no result.
    pub fn run(&self, args: &CommandArgs) -> Result<Option<String>, ExecError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(&args.positional)
            .stdin(Stdio::null());
        for (key, value) in &args.named {
            cmd.env(env_key(key), value);
        }

        tracing::debug!("Spawning {:?} for command '{}'", self.program, self.command);
        let output = cmd.output().map_err(|source| ExecError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ExecError::Failed {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!stdout.is_empty()).then_some(stdout))
    }
}

fn env_key(key: &str) -> String {
    format!("{}{}", NAMED_ARG_PREFIX, key.to_uppercase().replace('-', "_"))
}
