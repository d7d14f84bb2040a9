//! Developer workstation provisioning engine.
//!
//! Detects the system package manager, installs a package set, installs the
//! oh-my-zsh shell framework, writes editor and shell configuration (backing
//! up anything it touches), and runs the install scripts of external tmux and
//! font repositories from throwaway clones.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: built-in defaults with optional TOML overrides
//! - **[`resources`]**: idempotent `check + apply` primitives (files, packages, clones)
//! - **[`tasks`]**: named, ordered units of work wired to resources
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod resources;
pub mod tasks;
