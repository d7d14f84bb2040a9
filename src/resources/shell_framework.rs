//! Shell framework (oh-my-zsh) installation resource.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::external_repo::WORKSPACE_PREFIX;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::SetupError;
use crate::exec::Executor;

/// Installs the shell framework into `target` by running its installer
/// unattended. Present when `target` is a directory.
#[derive(Debug)]
pub struct ShellFrameworkResource<'a> {
    /// Installation directory (exported to the installer as `ZSH`).
    pub target: PathBuf,
    /// Installer location: `http(s)://` URL, `file://` URL, or local path.
    pub installer: String,
    executor: &'a dyn Executor,
    work_dir: PathBuf,
}

impl<'a> ShellFrameworkResource<'a> {
    /// Create a new shell framework resource.
    #[must_use]
    pub const fn new(
        target: PathBuf,
        installer: String,
        executor: &'a dyn Executor,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            target,
            installer,
            executor,
            work_dir,
        }
    }
}

/// Read the installer script from `source`.
///
/// # Errors
///
/// Returns [`SetupError::FetchFailed`] if the download or read fails.
pub fn fetch_installer(source: &str) -> Result<String, SetupError> {
    let failed = |reason: String| SetupError::FetchFailed {
        source_url: source.to_string(),
        reason,
    };

    if source.starts_with("http://") || source.starts_with("https://") {
        tracing::debug!("downloading {source}");
        ureq::get(source)
            .call()
            .map_err(|e| failed(e.to_string()))?
            .body_mut()
            .read_to_string()
            .map_err(|e| failed(e.to_string()))
    } else {
        let path = source.strip_prefix("file://").unwrap_or(source);
        std::fs::read_to_string(Path::new(path)).map_err(|e| failed(e.to_string()))
    }
}

impl Applicable for ShellFrameworkResource<'_> {
    fn description(&self) -> String {
        self.target.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.target.is_dir() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        let script = fetch_installer(&self.installer)?;
        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(&self.work_dir)
            .with_context(|| format!("creating workspace in {}", self.work_dir.display()))?;
        let installer = workspace.path().join("install.sh");
        std::fs::write(&installer, script)
            .with_context(|| format!("writing {}", installer.display()))?;

        let installer = installer.to_string_lossy().into_owned();
        let target = self.target.to_string_lossy().into_owned();
        self.executor.run_attached(
            None,
            "sh",
            &[installer.as_str(), "--unattended"],
            &[("ZSH", target.as_str()), ("RUNZSH", "no"), ("CHSH", "no")],
        )?;

        workspace
            .close()
            .context("removing temporary workspace")?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for ShellFrameworkResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.target.is_dir() {
            Ok(ResourceState::Correct)
        } else if self.target.exists() {
            Ok(ResourceState::Invalid {
                reason: "exists but is not a directory".to_string(),
            })
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
