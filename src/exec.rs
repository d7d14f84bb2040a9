//! External process execution behind an injectable [`Executor`] trait.
use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::SetupError;

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Render `program args...` for logs and error messages.
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Abstraction over process execution so resources can be tested without
/// touching the real system.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command and capture its output, allowing a non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be started.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command attached to the terminal: standard streams and the
    /// environment are inherited, `env` is added on top, and `dir` (when
    /// given) becomes the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::CommandNotStarted`] if the program cannot be
    /// spawned, or [`SetupError::CommandFailure`] if it exits non-zero.
    fn run_attached(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<()>;

    /// Check if a program is resolvable on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;

        Ok(ExecResult::from(output))
    }

    fn run_attached(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<()> {
        let label = command_line(program, args);
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        for (k, v) in env {
            cmd.env(k, v);
        }
        let status = cmd.status().map_err(|e| SetupError::CommandNotStarted {
            command: label.clone(),
            reason: e.to_string(),
        })?;
        if !status.success() {
            return Err(SetupError::CommandFailure {
                command: label,
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
