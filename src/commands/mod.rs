//! Top-level subcommand orchestration.
pub mod install;
pub mod version;

/// Version string embedded at build time, falling back to the crate version.
#[must_use]
pub fn version_string() -> &'static str {
    option_env!("DEVSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
