//! Execution context shared by every task.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;
use crate::prompt::Prompt;

/// Shared context for task execution.
pub struct Context {
    /// Resolved configuration.
    pub config: Arc<Config>,
    /// Detected platform information.
    pub platform: Arc<Platform>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// User's home directory path.
    pub home: PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Source of answers to interactive questions.
    pub prompt: Arc<dyn Prompt>,
    /// Directory under which scoped temporary workspaces are created.
    pub work_dir: PathBuf,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &self.executor)
            .field("prompt", &self.prompt)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution, using `$HOME` and the
    /// system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HOME environment variable is not set.
    pub fn new(
        config: Arc<Config>,
        platform: Arc<Platform>,
        log: Arc<dyn Log>,
        dry_run: bool,
        executor: Arc<dyn Executor>,
        prompt: Arc<dyn Prompt>,
    ) -> Result<Self> {
        let home = home_dir()?;
        Ok(Self {
            config,
            platform,
            log,
            dry_run,
            home,
            executor,
            prompt,
            work_dir: temp_dir_base(),
        })
    }

    /// Resolve `relative` against the home directory.
    #[must_use]
    pub fn home_path(&self, relative: &Path) -> PathBuf {
        self.home.join(relative)
    }
}

/// The user's home directory from `$HOME`.
///
/// # Errors
///
/// Returns an error if HOME is unset or empty.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))
}

/// Absolute base for temporary workspaces, so they never land under the
/// current directory when `TMPDIR` is relative.
#[must_use]
pub fn temp_dir_base() -> PathBuf {
    let dir = std::env::temp_dir();
    if dir.is_absolute() {
        dir
    } else {
        PathBuf::from("/tmp")
    }
}
