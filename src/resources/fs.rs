//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// `chrono` format of the suffix appended to backup files.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Current local time formatted as a backup suffix (`YYYYMMDD_HHMMSS`).
#[must_use]
pub fn backup_timestamp() -> String {
    chrono::Local::now()
        .format(BACKUP_TIMESTAMP_FORMAT)
        .to_string()
}

/// Path of the backup of `path` taken at `stamp`: `<path>.backup.<stamp>`.
#[must_use]
pub fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".backup.");
    name.push(stamp);
    PathBuf::from(name)
}

/// What occupies a path, judged without following a final symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// No entry at all.
    Nothing,
    /// A regular file (or another non-directory entry).
    File,
    /// A directory, or a symlink resolving to one.
    Directory,
    /// A symlink resolving to a non-directory.
    Symlink,
    /// A symlink whose target does not exist.
    DanglingSymlink,
}

/// Inspect `path` without following a final symlink.
///
/// # Errors
///
/// Returns an error if the entry exists but cannot be inspected.
pub fn occupant(path: &Path) -> Result<Occupant> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Occupant::Nothing),
        Err(e) => return Err(e).with_context(|| format!("inspect {}", path.display())),
    };
    if !meta.file_type().is_symlink() {
        return Ok(if meta.is_dir() {
            Occupant::Directory
        } else {
            Occupant::File
        });
    }
    match std::fs::metadata(path) {
        Ok(target) if target.is_dir() => Ok(Occupant::Directory),
        Ok(_) => Ok(Occupant::Symlink),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Occupant::DanglingSymlink),
        Err(e) => Err(e).with_context(|| format!("resolve symlink {}", path.display())),
    }
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Make `path` executable by its owner, group, and others (`0o755`).
///
/// # Errors
///
/// Returns an error if the permissions cannot be changed.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod 755 {}", path.display()))
}

/// No-op on platforms without a Unix permission model.
///
/// # Errors
///
/// Never fails.
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
