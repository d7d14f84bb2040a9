//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::FontsMode;

/// Top-level CLI entry point for the workstation provisioner.
#[derive(Parser, Debug)]
#[command(
    name = "devsetup",
    about = "Provision a developer workstation: packages, shell, editor and tmux configuration",
    version
)]
pub struct Cli {
    /// Subcommand; runs the full install when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to run, defaulting to `install`.
    #[must_use]
    pub const fn resolved_command(&self) -> &Command {
        match &self.command {
            Some(command) => command,
            None => &Command::Install,
        }
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Configuration file (default: $XDG_CONFIG_HOME/devsetup/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Font installation mode (overrides the configuration file)
    #[arg(long, global = true, value_enum)]
    pub fonts: Option<FontsMode>,

    /// Answer "yes" to every question
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install packages and write configuration (the default)
    Install,
    /// Print version information
    Version,
}
