//! Configuration file resource: create, or back up and append.
use anyhow::{Context as _, Result, bail};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use super::fs::{Occupant, backup_path, backup_timestamp, ensure_parent_dir, occupant};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// What a single write did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Backup of the previous content, present iff the file already existed.
    pub backup: Option<PathBuf>,
}

/// A configuration file that receives `content` on every apply.
///
/// A pre-existing file is copied to `<path>.backup.<YYYYMMDD_HHMMSS>` and
/// then appended to; a missing file is created. Content is always followed
/// by a newline. A symlink to a file is followed (its target is backed up and
/// appended to); a dangling symlink or a directory is refused. Two writes within the same second share a backup name, so
/// the later backup replaces the earlier one.
#[derive(Debug, Clone)]
pub struct ConfigFileResource {
    /// Target file.
    pub path: PathBuf,
    /// Text written on each apply.
    pub content: String,
}

impl ConfigFileResource {
    /// Create a new configuration file resource.
    #[must_use]
    pub const fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }

    /// Write using the current local time as the backup suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup copy, directory creation, or the write
    /// itself fails.
    pub fn write(&self) -> Result<WriteOutcome> {
        write_with_timestamp(&self.path, &self.content, &backup_timestamp())
    }
}

/// Back up `path` (if present) with suffix `stamp`, ensure its parent exists,
/// then create or append `content` plus a newline.
///
/// # Errors
///
/// Returns an error if `path` is a directory or a dangling symlink, or if any
/// filesystem step fails. The backup is taken before the file is touched, so
/// a failure after it leaves the original recoverable.
pub fn write_with_timestamp(path: &Path, content: &str, stamp: &str) -> Result<WriteOutcome> {
    let backup = match occupant(path)? {
        Occupant::Nothing => None,
        Occupant::File | Occupant::Symlink => {
            let backup = backup_path(path, stamp);
            std::fs::copy(path, &backup).with_context(|| {
                format!("backing up {} to {}", path.display(), backup.display())
            })?;
            Some(backup)
        }
        Occupant::Directory => bail!("{} is a directory", path.display()),
        Occupant::DanglingSymlink => {
            bail!("{} is a symlink to a missing file", path.display())
        }
    };

    ensure_parent_dir(path)?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    writeln!(file, "{content}").with_context(|| format!("writing {}", path.display()))?;

    Ok(WriteOutcome { backup })
}

impl Applicable for ConfigFileResource {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.write()?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for ConfigFileResource {
    fn current_state(&self) -> Result<ResourceState> {
        let state = match occupant(&self.path)? {
            Occupant::Nothing => ResourceState::Missing,
            Occupant::File | Occupant::Symlink => ResourceState::Incorrect {
                current: "existing file, will be backed up and appended".to_string(),
            },
            Occupant::Directory => ResourceState::Invalid {
                reason: "target is a directory".to_string(),
            },
            Occupant::DanglingSymlink => ResourceState::Invalid {
                reason: "target is a symlink to a missing file".to_string(),
            },
        };
        Ok(state)
    }
}
