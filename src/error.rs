//! Domain-specific error types for the provisioning engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Resources and tasks return typed errors (e.g., [`SetupError`],
//! [`ConfigError`]) wrapped in [`anyhow::Error`]; the command layer adds the
//! name of the failing step as context via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SetupError
//! ├── PrivilegeViolation      — running as root
//! ├── UnknownUser             — effective user id could not be read
//! ├── UnsupportedEnvironment  — no known package manager
//! ├── CommandNotStarted       — external command could not be spawned
//! ├── CommandFailure          — external command exited non-zero
//! ├── CloneFailed             — git clone of an external repository
//! ├── ScriptMissing           — expected script absent from a clone
//! └── FetchFailed             — installer download
//! ConfigError                 — TOML configuration loading and validation
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while provisioning the workstation.
///
/// Every variant aborts the run; nothing is retried.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The tool was started by the root user.
    #[error("refusing to run as root; run as a regular user (sudo is requested per command)")]
    PrivilegeViolation,

    /// The effective user id could not be determined, so the root check
    /// cannot be made.
    #[error("cannot determine the effective user id: {reason}")]
    UnknownUser {
        /// Why the lookup failed.
        reason: String,
    },

    /// None of the supported package managers was found on `PATH`.
    #[error("unsupported environment: none of {candidates} found on PATH")]
    UnsupportedEnvironment {
        /// Comma-separated list of executables searched for.
        candidates: String,
    },

    /// An external command could not be spawned.
    #[error("could not start {command}: {reason}")]
    CommandNotStarted {
        /// Rendered command line.
        command: String,
        /// Spawn error.
        reason: String,
    },

    /// An external command exited with a non-zero status.
    #[error("command failed ({}): {command}", .code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit {c}")))]
    CommandFailure {
        /// Rendered command line.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// Cloning an external repository failed.
    #[error("failed to clone {url}: {reason}")]
    CloneFailed {
        /// Repository URL.
        url: String,
        /// Message reported by git.
        reason: String,
    },

    /// The clone does not contain the script that should be executed.
    #[error("script '{}' not found in {url}", .script.display())]
    ScriptMissing {
        /// Repository URL.
        url: String,
        /// Script path relative to the repository root.
        script: PathBuf,
    },

    /// Downloading an installer script failed.
    #[error("failed to fetch {source_url}: {reason}")]
    FetchFailed {
        /// URL or path the installer was fetched from.
        source_url: String,
        /// Underlying failure.
        reason: String,
    },
}

/// Errors that arise from loading and validating the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("invalid config file {path}: {message}")]
    Parse {
        /// Path to the offending file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A configured path is absolute or escapes its base directory.
    #[error("invalid {field} '{value}': must be a relative path without '..'")]
    InvalidPath {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The package list is empty.
    #[error("package list must not be empty")]
    NoPackages,
}
