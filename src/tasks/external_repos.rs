//! Tasks that clone an external repository and run its installer: tmux
//! configuration and, when enabled, fonts.
use anyhow::Result;

use super::{Context, Task, TaskResult, apply_resource};
use crate::config::{FontsMode, RepoEntry};
use crate::resources::external_repo::ExternalRepoResource;

/// Clone `repo` into a scoped workspace and run its script.
fn run_repo_script(ctx: &Context, repo: &RepoEntry) -> Result<TaskResult> {
    let resource = ExternalRepoResource::new(
        repo.url.clone(),
        repo.script.clone(),
        &*ctx.executor,
        ctx.work_dir.clone(),
    );
    apply_resource(ctx, &resource, "run")
}

/// Apply the external tmux configuration.
#[derive(Debug)]
pub struct ApplyTmuxConfig;

impl Task for ApplyTmuxConfig {
    fn name(&self) -> &'static str {
        "Apply tmux config"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        run_repo_script(ctx, &ctx.config.tmux)
    }
}

/// Run the Nerd Fonts installer, gated by [`FontsMode`].
#[derive(Debug)]
pub struct InstallFonts;

impl Task for InstallFonts {
    fn name(&self) -> &'static str {
        "Install fonts"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.fonts.mode != FontsMode::Skip
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let fonts = &ctx.config.fonts;
        if fonts.mode == FontsMode::Prompt && !ctx.dry_run {
            let question = format!("Install fonts from {}? This can take a while.", fonts.url);
            if !ctx.prompt.confirm(&question, false)? {
                return Ok(TaskResult::Skipped("declined".to_string()));
            }
        }
        run_repo_script(ctx, &fonts.repo())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::SetupError;
    use crate::resources::test_helpers::{MockExecutor, init_fixture_repo};
    use crate::tasks::test_helpers::{ScriptedPrompt, make_context, make_context_with};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn fixture_repo() -> tempfile::TempDir {
        let upstream = tempfile::tempdir().unwrap();
        init_fixture_repo(upstream.path(), &[("install.sh", "#!/bin/sh\n")]);
        upstream
    }

    fn fonts_config(mode: FontsMode, url: &str) -> Config {
        let mut config = Config::default();
        config.fonts.mode = mode;
        config.fonts.url = url.to_string();
        config
    }

    #[test]
    fn tmux_script_runs_from_clone() {
        let upstream = fixture_repo();
        let mut config = Config::default();
        config.tmux.url = upstream.path().to_string_lossy().to_string();
        let executor = Arc::new(MockExecutor::succeeding(1));
        let (ctx, _log, _home) = make_context_with(
            config,
            Arc::clone(&executor) as Arc<dyn crate::exec::Executor>,
            Arc::new(ScriptedPrompt::new(false)),
        );

        let result = ApplyTmuxConfig.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Ok));
        assert_eq!(executor.calls().len(), 1);
        assert!(std::fs::read_dir(&ctx.work_dir).unwrap().next().is_none());
    }

    #[test]
    fn tmux_clone_failure_is_fatal() {
        let mut config = Config::default();
        config.tmux.url = "/nonexistent/tmux-config".to_string();
        let (ctx, _log, _home) = make_context(config);

        let err = ApplyTmuxConfig.run(&ctx).unwrap_err();

        assert!(
            matches!(
                err.downcast_ref::<SetupError>(),
                Some(SetupError::CloneFailed { .. })
            ),
            "{err:#}"
        );
    }

    #[test]
    fn fonts_are_skipped_by_default() {
        let (ctx, _log, _home) = make_context(Config::default());
        assert!(!InstallFonts.should_run(&ctx));
    }

    #[test]
    fn declined_prompt_skips_fonts() {
        let prompt = Arc::new(ScriptedPrompt::new(false));
        let executor = Arc::new(MockExecutor::default());
        let (ctx, _log, _home) = make_context_with(
            fonts_config(FontsMode::Prompt, "/nonexistent/fonts"),
            Arc::clone(&executor) as Arc<dyn crate::exec::Executor>,
            Arc::clone(&prompt) as Arc<dyn crate::prompt::Prompt>,
        );

        assert!(InstallFonts.should_run(&ctx));
        let result = InstallFonts.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Skipped(_)));
        assert_eq!(prompt.questions().len(), 1);
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn accepted_prompt_installs_fonts() {
        let upstream = fixture_repo();
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let executor = Arc::new(MockExecutor::succeeding(1));
        let (ctx, _log, _home) = make_context_with(
            fonts_config(FontsMode::Prompt, &upstream.path().to_string_lossy()),
            Arc::clone(&executor) as Arc<dyn crate::exec::Executor>,
            Arc::clone(&prompt) as Arc<dyn crate::prompt::Prompt>,
        );

        let result = InstallFonts.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Ok));
        assert_eq!(executor.calls().len(), 1);
    }

    #[test]
    fn always_mode_does_not_ask() {
        let upstream = fixture_repo();
        let prompt = Arc::new(ScriptedPrompt::new(false));
        let executor = Arc::new(MockExecutor::succeeding(1));
        let mut config = fonts_config(FontsMode::Always, &upstream.path().to_string_lossy());
        config.fonts.script = PathBuf::from("install.sh");
        let (ctx, _log, _home) = make_context_with(
            config,
            Arc::clone(&executor) as Arc<dyn crate::exec::Executor>,
            Arc::clone(&prompt) as Arc<dyn crate::prompt::Prompt>,
        );

        InstallFonts.run(&ctx).unwrap();

        assert!(prompt.questions().is_empty());
        assert_eq!(executor.calls().len(), 1);
    }

    #[test]
    fn dry_run_neither_asks_nor_clones() {
        let prompt = Arc::new(ScriptedPrompt::new(true));
        let (mut ctx, _log, _home) = make_context_with(
            fonts_config(FontsMode::Prompt, "/nonexistent/fonts"),
            Arc::new(MockExecutor::default()),
            Arc::clone(&prompt) as Arc<dyn crate::prompt::Prompt>,
        );
        ctx.dry_run = true;

        let result = InstallFonts.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::DryRun));
        assert!(prompt.questions().is_empty());
    }
}
