// Shared helpers for integration tests.
//
// Provides an isolated home directory, local git fixture repositories, and an
// executor that fakes `sudo` and package-manager discovery while running
// every other command for real.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use devsetup_cli::config::Config;
use devsetup_cli::exec::{ExecResult, Executor, SystemExecutor, command_line};
use devsetup_cli::logging::{Log, Logger};
use devsetup_cli::platform::{Os, Platform};
use devsetup_cli::prompt::AssumeYes;
use devsetup_cli::tasks::Context;

/// Installer stand-in: creates `$ZSH` when invoked unattended.
pub const INSTALLER_SCRIPT: &str = "#!/bin/sh\n\
    [ \"$1\" = --unattended ] || exit 2\n\
    mkdir -p \"$ZSH\"\n";

/// Executor that records every command, answers `which` from a fixed list,
/// pretends `sudo` commands succeed, and runs everything else for real.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    on_path: Vec<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    /// Executor whose `PATH` contains exactly `programs`.
    pub fn with_path(programs: &[&'static str]) -> Self {
        Self {
            on_path: programs.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command line issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, program: &str, args: &[&str]) {
        self.calls
            .lock()
            .expect("calls lock")
            .push(command_line(program, args));
    }
}

impl Executor for RecordingExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args);
        SystemExecutor.run_unchecked(program, args)
    }

    fn run_attached(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> anyhow::Result<()> {
        self.record(program, args);
        if program == "sudo" {
            return Ok(());
        }
        SystemExecutor.run_attached(dir, program, args, env)
    }

    fn which(&self, program: &str) -> bool {
        self.on_path.iter().any(|p| *p == program)
    }
}

/// Initialise a git repository at `dir` with one commit containing `files`.
pub fn init_repo(dir: &Path, files: &[(&str, &str)]) {
    let repo = git2::Repository::init(dir).expect("init repo");
    let mut index = repo.index().expect("index");
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, content).expect("write fixture file");
        index.add_path(Path::new(name)).expect("add to index");
    }
    index.write().expect("write index");
    let tree = repo
        .find_tree(index.write_tree().expect("write tree"))
        .expect("find tree");
    let sig = git2::Signature::now("test", "test@example.com").expect("signature");
    repo.commit(Some("HEAD"), &sig, &sig, "fixture", &tree, &[])
        .expect("commit");
}

#[derive(Debug)]
/// An isolated environment: fresh home, scratch work dir, and local fixture
/// sources for the shell framework installer and the tmux repository.
pub struct TestEnv {
    /// Home directory the run provisions.
    pub home: tempfile::TempDir,
    /// Base for scoped workspaces; must be empty after every run.
    pub work: tempfile::TempDir,
    /// Fixture installer and repositories.
    pub fixtures: tempfile::TempDir,
}

impl TestEnv {
    /// Create the environment and its fixtures.
    pub fn new() -> Self {
        let env = Self {
            home: tempfile::tempdir().expect("home"),
            work: tempfile::tempdir().expect("work"),
            fixtures: tempfile::tempdir().expect("fixtures"),
        };
        std::fs::write(env.installer_path(), INSTALLER_SCRIPT).expect("write installer");

        let tmux = env.tmux_repo_path();
        std::fs::create_dir(&tmux).expect("tmux repo dir");
        let script = format!("#!/bin/sh\ntouch '{}'\n", env.tmux_marker().display());
        init_repo(&tmux, &[("install.sh", &script)]);
        env
    }

    /// Local shell framework installer.
    pub fn installer_path(&self) -> PathBuf {
        self.fixtures.path().join("install-framework.sh")
    }

    /// Local tmux configuration repository.
    pub fn tmux_repo_path(&self) -> PathBuf {
        self.fixtures.path().join("tmux-config")
    }

    /// File created by the tmux repository's install script.
    pub fn tmux_marker(&self) -> PathBuf {
        self.fixtures.path().join("tmux-installed")
    }

    /// Default configuration pointed at the local fixtures.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.shell_framework.installer = self.installer_path().to_string_lossy().to_string();
        config.tmux.url = self.tmux_repo_path().to_string_lossy().to_string();
        config
    }

    /// Build a [`Context`] for this environment.
    pub fn context(
        &self,
        config: Config,
        executor: Arc<dyn Executor>,
        dry_run: bool,
    ) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new(None));
        let ctx = Context {
            config: Arc::new(config),
            platform: Arc::new(Platform::new(Os::Linux, false)),
            log: Arc::clone(&log) as Arc<dyn Log>,
            dry_run,
            home: self.home.path().to_path_buf(),
            executor,
            prompt: Arc::new(AssumeYes),
            work_dir: self.work.path().to_path_buf(),
        };
        (ctx, log)
    }

    /// Names of the entries directly under the home directory.
    pub fn home_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.home.path())
            .expect("read home")
            .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Whether no scoped workspace was left behind.
    pub fn work_is_clean(&self) -> bool {
        std::fs::read_dir(self.work.path())
            .expect("read work")
            .next()
            .is_none()
    }
}
