//! Operating system and privilege detection.
use std::fmt;

use crate::error::SetupError;
use crate::exec::Executor;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux (the only platform with a supported package manager).
    Linux,
    /// Any other Unix-like system.
    OtherUnix,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::OtherUnix => write!(f, "unix"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// Whether the effective user is root.
    pub is_root: bool,
}

impl Platform {
    /// Detect the current platform.
    ///
    /// The effective user id is read with `id -u`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::UnknownUser`] if `id` cannot be run, fails, or
    /// prints something other than a numeric id.
    pub fn detect(executor: &dyn Executor) -> Result<Self, SetupError> {
        Ok(Self {
            os: Self::detect_os(),
            is_root: effective_uid(executor)? == 0,
        })
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub const fn new(os: Os, is_root: bool) -> Self {
        Self { os, is_root }
    }

    fn detect_os() -> Os {
        if cfg!(target_os = "linux") {
            Os::Linux
        } else {
            Os::OtherUnix
        }
    }
}

fn effective_uid(executor: &dyn Executor) -> Result<u32, SetupError> {
    let unknown = |reason: String| SetupError::UnknownUser { reason };
    let result = executor
        .run_unchecked("id", &["-u"])
        .map_err(|e| unknown(format!("{e:#}")))?;
    if !result.success {
        return Err(unknown(format!("`id -u` exited with {:?}", result.code)));
    }
    let uid = result.stdout.trim();
    uid.parse::<u32>()
        .map_err(|_| unknown(format!("unexpected `id -u` output '{uid}'")))
}
