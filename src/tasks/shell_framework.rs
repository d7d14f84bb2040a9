//! Task: install the shell framework.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resource};
use crate::resources::shell_framework::ShellFrameworkResource;

/// Install the shell framework (oh-my-zsh) unless it is already present.
#[derive(Debug)]
pub struct InstallShellFramework;

impl Task for InstallShellFramework {
    fn name(&self) -> &'static str {
        "Install shell framework"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let entry = &ctx.config.shell_framework;
        let resource = ShellFrameworkResource::new(
            ctx.home_path(&entry.dir),
            entry.installer.clone(),
            &*ctx.executor,
            ctx.work_dir.clone(),
        );
        process_resource(ctx, &resource, "install")
    }
}
