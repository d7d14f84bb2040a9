//! Shared check-then-apply cycle for resource-backed tasks.
use anyhow::{Result, bail};

use super::context::Context;
use crate::resources::{Applicable, Resource, ResourceChange, ResourceState};

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use devsetup_cli::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("declined".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (e.g. the user declined).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Check a stateful resource and apply it when it is missing or incorrect.
///
/// `Correct` resources are left alone. `Invalid` resources abort the run.
/// In dry-run mode the intended change is logged instead of applied.
///
/// # Errors
///
/// Returns an error if the state cannot be determined, the resource is
/// invalid, or applying it fails.
pub fn process_resource<R: Resource>(ctx: &Context, resource: &R, verb: &str) -> Result<TaskResult> {
    let desc = resource.description();
    match resource.current_state()? {
        ResourceState::Correct => {
            ctx.log.info(&format!("already present: {desc}"));
            Ok(TaskResult::Ok)
        }
        ResourceState::Invalid { reason } => bail!("cannot {verb} {desc}: {reason}"),
        ResourceState::Incorrect { current } if ctx.dry_run => {
            ctx.log
                .dry_run(&format!("would {verb} {desc} (currently {current})"));
            Ok(TaskResult::DryRun)
        }
        ResourceState::Missing | ResourceState::Incorrect { .. } => {
            apply_resource(ctx, resource, verb)
        }
    }
}

/// Apply a resource that has no observable state of its own (package sets,
/// external scripts). In dry-run mode only the intent is logged.
///
/// # Errors
///
/// Propagates the error returned by [`Applicable::apply`].
pub fn apply_resource(ctx: &Context, resource: &dyn Applicable, verb: &str) -> Result<TaskResult> {
    let desc = resource.description();
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would {verb}: {desc}"));
        return Ok(TaskResult::DryRun);
    }

    ctx.log.debug(&format!("{verb}: {desc}"));
    match resource.apply()? {
        ResourceChange::Applied => ctx.log.info(&format!("{verb}: {desc}")),
        ResourceChange::AlreadyCorrect => ctx.log.info(&format!("already present: {desc}")),
    }
    Ok(TaskResult::Ok)
}
