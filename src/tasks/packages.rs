//! Task: install the package set.
use anyhow::Result;

use super::{Context, Task, TaskResult, apply_resource};
use crate::resources::package::{PackageManager, PackageSetResource};

/// Install the configured package set with the detected package manager.
#[derive(Debug)]
pub struct InstallPackages;

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        "Install packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let manager = PackageManager::detect(&*ctx.executor)?;
        ctx.log.debug(&format!("using {manager} package manager"));
        ctx.log.debug(&format!(
            "{} packages to install",
            ctx.config.packages.len()
        ));

        let resource = PackageSetResource::new(ctx.config.packages.clone(), manager, &*ctx.executor);
        if ctx.dry_run {
            for command in resource.planned_commands() {
                ctx.log.dry_run(&format!("would run: {command}"));
            }
            return Ok(TaskResult::DryRun);
        }
        apply_resource(ctx, &resource, "install")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::SetupError;
    use crate::resources::test_helpers::MockExecutor;
    use crate::tasks::test_helpers::{ScriptedPrompt, make_context_with};
    use std::sync::Arc;

    fn context_with(executor: &Arc<MockExecutor>) -> (Context, tempfile::TempDir) {
        let (ctx, _log, home) = make_context_with(
            Config::default(),
            Arc::clone(executor) as Arc<dyn crate::exec::Executor>,
            Arc::new(ScriptedPrompt::new(false)),
        );
        (ctx, home)
    }

    #[test]
    fn installs_with_detected_manager() {
        let executor = Arc::new(MockExecutor::succeeding(2).with_on_path("dnf"));
        let (ctx, _home) = context_with(&executor);

        let result = InstallPackages.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Ok));
        assert_eq!(
            executor.calls(),
            vec![
                "sudo dnf makecache".to_string(),
                "sudo dnf install -y git vim tmux curl zsh python3 flatpak".to_string(),
            ]
        );
    }

    #[test]
    fn unsupported_environment_is_an_error() {
        let executor = Arc::new(MockExecutor::default());
        let (ctx, _home) = context_with(&executor);

        let err = InstallPackages.run(&ctx).unwrap_err();

        assert!(
            matches!(
                err.downcast_ref::<SetupError>(),
                Some(SetupError::UnsupportedEnvironment { .. })
            ),
            "{err:#}"
        );
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn dry_run_issues_no_commands() {
        let executor = Arc::new(MockExecutor::default().with_on_path("apt"));
        let (mut ctx, _home) = context_with(&executor);
        ctx.dry_run = true;

        let result = InstallPackages.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::DryRun));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn empty_package_list_is_not_applicable() {
        let config = Config {
            packages: vec![],
            ..Config::default()
        };
        let (ctx, _log, _home) = crate::tasks::test_helpers::make_context(config);
        assert!(!InstallPackages.should_run(&ctx));
    }
}
