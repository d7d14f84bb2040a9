//! Clone a third-party repository into a throwaway directory and run one of
//! its scripts.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use git2::FetchOptions;
use git2::build::RepoBuilder;

use super::fs::make_executable;
use super::{Applicable, ResourceChange};
use crate::error::SetupError;
use crate::exec::Executor;

/// Prefix of every scoped workspace directory.
pub const WORKSPACE_PREFIX: &str = "devsetup-";

/// An external repository whose `script` is executed from a fresh clone.
///
/// The clone lives in a [`tempfile::TempDir`] under `work_dir` and is removed
/// when [`apply`](Applicable::apply) returns, whichever way it returns.
#[derive(Debug)]
pub struct ExternalRepoResource<'a> {
    /// Repository URL or local path.
    pub url: String,
    /// Script path relative to the repository root.
    pub script: PathBuf,
    executor: &'a dyn Executor,
    work_dir: PathBuf,
}

impl<'a> ExternalRepoResource<'a> {
    /// Create a new external repository resource.
    #[must_use]
    pub const fn new(
        url: String,
        script: PathBuf,
        executor: &'a dyn Executor,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            url,
            script,
            executor,
            work_dir,
        }
    }

    fn run_in_workspace(&self, workspace: &Path) -> Result<()> {
        let clone_dir = workspace.join("repo");
        clone(&self.url, &clone_dir)?;

        let script = clone_dir.join(&self.script);
        if !script.is_file() {
            return Err(SetupError::ScriptMissing {
                url: self.url.clone(),
                script: self.script.clone(),
            }
            .into());
        }
        make_executable(&script)?;

        let program = script.to_string_lossy();
        self.executor
            .run_attached(Some(&clone_dir), &program, &[], &[])
            .with_context(|| format!("running {} from {}", self.script.display(), self.url))
    }
}

impl Applicable for ExternalRepoResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.url, self.script.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(&self.work_dir)
            .with_context(|| format!("creating workspace in {}", self.work_dir.display()))?;

        self.run_in_workspace(workspace.path())?;

        workspace
            .close()
            .context("removing temporary workspace")?;
        Ok(ResourceChange::Applied)
    }
}

/// Whether `url` refers to a repository on the local filesystem.
fn is_local(url: &str) -> bool {
    url.starts_with("file://") || Path::new(url).is_absolute() || Path::new(url).exists()
}

/// Clone `url` into `target`, shallow for network remotes.
///
/// # Errors
///
/// Returns [`SetupError::CloneFailed`] with the message reported by git.
pub fn clone(url: &str, target: &Path) -> Result<(), SetupError> {
    let mut fetch_options = FetchOptions::new();
    if !is_local(url) {
        fetch_options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder
        .clone(url, target)
        .map(|_| ())
        .map_err(|e| SetupError::CloneFailed {
            url: url.to_string(),
            reason: e.message().to_string(),
        })
}
