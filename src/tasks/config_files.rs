//! Tasks: write the editor and shell configuration files.
use anyhow::{Result, bail};

use super::{Context, Task, TaskResult};
use crate::config::ConfigFileEntry;
use crate::resources::config_file::ConfigFileResource;
use crate::resources::fs::{Occupant, occupant};
use crate::resources::{Resource, ResourceState};

/// Create or append one configuration file under the home directory.
fn write_config_file(ctx: &Context, entry: &ConfigFileEntry) -> Result<TaskResult> {
    let resource = ConfigFileResource::new(ctx.home_path(&entry.path), entry.content.clone());
    let target = resource.path.display();

    let action = match resource.current_state()? {
        ResourceState::Invalid { reason } => bail!("cannot write {target}: {reason}"),
        ResourceState::Missing => "create",
        _ => "back up and append to",
    };
    if occupant(&resource.path)? == Occupant::Symlink
        && let Ok(real) = std::fs::read_link(&resource.path)
    {
        ctx.log.warn(&format!(
            "{target} is a symlink; writing through it to {}",
            real.display()
        ));
    }
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would {action} {target}"));
        return Ok(TaskResult::DryRun);
    }

    let outcome = resource.write()?;
    match outcome.backup {
        Some(backup) => {
            ctx.log
                .info(&format!("backed up {target} to {}", backup.display()));
            ctx.log.info(&format!("appended to {target}"));
        }
        None => ctx.log.info(&format!("created {target}")),
    }
    Ok(TaskResult::Ok)
}

/// Write the editor configuration (`~/.vimrc` by default).
#[derive(Debug)]
pub struct WriteEditorConfig;

impl Task for WriteEditorConfig {
    fn name(&self) -> &'static str {
        "Write editor config"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        write_config_file(ctx, &ctx.config.editor)
    }
}

/// Write the shell configuration (`~/.zshrc` by default).
#[derive(Debug)]
pub struct WriteShellConfig;

impl Task for WriteShellConfig {
    fn name(&self) -> &'static str {
        "Write shell config"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        write_config_file(ctx, &ctx.config.shell)
    }
}
