//! Command: provision the workstation.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::SetupError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::prompt::{AssumeYes, Prompt, StdinPrompt};
use crate::tasks::{self, Context, context::home_dir};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the user is root, or
/// any provisioning step fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
    let platform = Platform::detect(&*executor)?;
    log.info(&format!("devsetup {}", super::version_string()));
    log.debug(&format!("platform: {} (root: {})", platform.os, platform.is_root));

    let home = home_dir()?;
    log.stage("Loading configuration");
    let mut config = Config::resolve(global.config.as_deref(), &home)?;
    if let Some(mode) = global.fonts {
        config.fonts.mode = mode;
    }
    log.info(&format!(
        "{} packages, fonts: {}",
        config.packages.len(),
        config.fonts.mode
    ));

    let prompt: Arc<dyn Prompt> = if global.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinPrompt)
    };
    let ctx = Context::new(
        Arc::new(config),
        Arc::new(platform),
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        executor,
        prompt,
    )?;

    execute(&ctx, log)
}

/// Refuse to run as root, then run every install task in order, stopping at
/// the first failure. The summary is printed either way.
///
/// # Errors
///
/// Returns [`SetupError::PrivilegeViolation`] for the root user, otherwise
/// the first task error with the failing step's name as context.
pub fn execute(ctx: &Context, log: &Logger) -> Result<()> {
    if ctx.platform.is_root {
        return Err(SetupError::PrivilegeViolation.into());
    }
    if ctx.dry_run {
        log.info("dry run: no changes will be made");
    }

    let result = tasks::all_install_tasks()
        .iter()
        .try_for_each(|task| tasks::execute(task.as_ref(), ctx));

    log.print_summary();
    result
}
