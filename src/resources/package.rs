//! Package manager detection and package installation.
use anyhow::{Context as _, Result};

use super::{Applicable, ResourceChange};
use crate::error::SetupError;
use crate::exec::{Executor, command_line};

/// Supported package managers, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Debian/Ubuntu (`apt`).
    Apt,
    /// Fedora/RHEL 8+ (`dnf`).
    Dnf,
    /// Older RHEL/CentOS (`yum`).
    Yum,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

impl PackageManager {
    /// Every supported manager, in the order they are checked.
    pub const ALL: [Self; 3] = [Self::Apt, Self::Dnf, Self::Yum];

    /// Executable name of the manager.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
        }
    }

    /// Return the first manager resolvable on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::UnsupportedEnvironment`] when none is found.
    pub fn detect(executor: &dyn Executor) -> Result<Self, SetupError> {
        Self::ALL
            .into_iter()
            .find(|m| executor.which(m.program()))
            .ok_or_else(|| SetupError::UnsupportedEnvironment {
                candidates: Self::ALL
                    .iter()
                    .map(|m| m.program())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// A package manager operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageCommand {
    /// Refresh the package index.
    Update,
    /// Install the package set non-interactively.
    Install,
}

impl PackageCommand {
    /// Arguments passed to `sudo` for this command.
    #[must_use]
    pub fn sudo_args<'a>(self, manager: PackageManager, packages: &'a [String]) -> Vec<&'a str> {
        let mut args = vec![manager.program()];
        match (self, manager) {
            (Self::Update, PackageManager::Apt) => args.push("update"),
            (Self::Update, PackageManager::Dnf | PackageManager::Yum) => args.push("makecache"),
            (Self::Install, _) => {
                args.extend(["install", "-y"]);
                args.extend(packages.iter().map(String::as_str));
            }
        }
        args
    }
}

/// The configured package set, installed with one update and one install
/// command.
#[derive(Debug)]
pub struct PackageSetResource<'a> {
    /// Package names.
    pub packages: Vec<String>,
    /// Manager to use.
    pub manager: PackageManager,
    executor: &'a dyn Executor,
}

impl<'a> PackageSetResource<'a> {
    /// Create a new package set resource.
    #[must_use]
    pub const fn new(
        packages: Vec<String>,
        manager: PackageManager,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            packages,
            manager,
            executor,
        }
    }

    /// Commands issued by [`apply`](Applicable::apply), in order.
    #[must_use]
    pub fn planned_commands(&self) -> Vec<String> {
        [PackageCommand::Update, PackageCommand::Install]
            .into_iter()
            .map(|c| command_line("sudo", &c.sudo_args(self.manager, &self.packages)))
            .collect()
    }

    fn run(&self, command: PackageCommand) -> Result<()> {
        let args = command.sudo_args(self.manager, &self.packages);
        self.executor
            .run_attached(None, "sudo", &args, &[])
            .with_context(|| format!("{} {command:?}", self.manager).to_lowercase())
    }
}

impl Applicable for PackageSetResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.packages.join(" "), self.manager)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.run(PackageCommand::Update)?;
        self.run(PackageCommand::Install)?;
        Ok(ResourceChange::Applied)
    }
}
