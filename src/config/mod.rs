//! Run configuration: built-in defaults with optional TOML overrides.
pub mod defaults;
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// When to run the optional font installer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FontsMode {
    /// Never install fonts.
    #[default]
    Skip,
    /// Ask before installing fonts.
    Prompt,
    /// Install fonts without asking.
    Always,
}

impl std::fmt::Display for FontsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Prompt => write!(f, "prompt"),
            Self::Always => write!(f, "always"),
        }
    }
}

/// A configuration file to create or append to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileEntry {
    /// Target path, relative to the home directory.
    pub path: PathBuf,
    /// Content written (or appended) followed by a newline.
    pub content: String,
}

/// An external repository whose script is run after cloning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoEntry {
    /// Clone URL.
    pub url: String,
    /// Script path relative to the repository root.
    pub script: PathBuf,
}

/// Shell framework installation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellFrameworkEntry {
    /// Install directory, relative to the home directory.
    pub dir: PathBuf,
    /// Installer source: an `http(s)://` URL, a `file://` URL, or a local path.
    pub installer: String,
}

impl Default for ShellFrameworkEntry {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::SHELL_FRAMEWORK_DIR),
            installer: defaults::SHELL_FRAMEWORK_INSTALLER.to_string(),
        }
    }
}

/// Optional font installation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsEntry {
    /// Whether (and how) to run the font installer.
    pub mode: FontsMode,
    /// Clone URL of the font installer repository.
    pub url: String,
    /// Script path relative to the repository root.
    pub script: PathBuf,
}

impl Default for FontsEntry {
    fn default() -> Self {
        Self {
            mode: FontsMode::Skip,
            url: defaults::FONTS_REPO.to_string(),
            script: PathBuf::from(defaults::FONTS_SCRIPT),
        }
    }
}

impl FontsEntry {
    /// The repository half of this entry.
    #[must_use]
    pub fn repo(&self) -> RepoEntry {
        RepoEntry {
            url: self.url.clone(),
            script: self.script.clone(),
        }
    }
}

/// All settings for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Packages installed through the system package manager.
    pub packages: Vec<String>,
    /// Editor configuration file.
    pub editor: ConfigFileEntry,
    /// Shell configuration file.
    pub shell: ConfigFileEntry,
    /// Shell framework (oh-my-zsh) installation.
    pub shell_framework: ShellFrameworkEntry,
    /// tmux configuration repository.
    pub tmux: RepoEntry,
    /// Optional font installer.
    pub fonts: FontsEntry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packages: defaults::PACKAGES.iter().map(|p| (*p).to_string()).collect(),
            editor: ConfigFileEntry {
                path: PathBuf::from(defaults::EDITOR_PATH),
                content: defaults::EDITOR_CONTENT.to_string(),
            },
            shell: ConfigFileEntry {
                path: PathBuf::from(defaults::SHELL_PATH),
                content: defaults::SHELL_CONTENT.to_string(),
            },
            shell_framework: ShellFrameworkEntry::default(),
            tmux: RepoEntry {
                url: defaults::TMUX_REPO.to_string(),
                script: PathBuf::from(defaults::TMUX_SCRIPT),
            },
            fonts: FontsEntry::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults for a
    /// missing file or missing sections, then validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML for
    /// this schema, or fails [`Config::validate`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml_loader::load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist; otherwise the per-user default location
    /// is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist or if loading fails.
    pub fn resolve(explicit: Option<&Path>, home: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError::Io {
                path: path.display().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Some(path) => Self::load(path),
            None => Self::load(&default_path(home)),
        }
    }

    /// Check that every configured path stays inside its base directory and
    /// that there is something to install.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.packages.is_empty() {
            return Err(ConfigError::NoPackages);
        }
        let paths: [(&'static str, &Path); 5] = [
            ("editor.path", &self.editor.path),
            ("shell.path", &self.shell.path),
            ("shell_framework.dir", &self.shell_framework.dir),
            ("tmux.script", &self.tmux.script),
            ("fonts.script", &self.fonts.script),
        ];
        for (field, path) in paths {
            if !is_contained(path) {
                return Err(ConfigError::InvalidPath {
                    field,
                    value: path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Per-user config location: `$XDG_CONFIG_HOME/devsetup/config.toml`, or
/// `~/.config/devsetup/config.toml`.
#[must_use]
pub fn default_path(home: &Path) -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map_or_else(|| home.join(".config"), PathBuf::from)
        .join("devsetup")
        .join("config.toml")
}

/// Whether `path` is a non-empty relative path that never climbs upward.
fn is_contained(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(
            config.packages,
            vec!["git", "vim", "tmux", "curl", "zsh", "python3", "flatpak"]
        );
        assert_eq!(config.editor.path, PathBuf::from(".vimrc"));
        assert_eq!(config.shell.path, PathBuf::from(".zshrc"));
        assert_eq!(config.fonts.mode, FontsMode::Skip);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_overrides_only_given_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "packages = [\"git\"]\n\n[fonts]\nmode = \"prompt\"\n\n[tmux]\nurl = \"https://example.com/tmux.git\"\nscript = \"setup/run.sh\"\n",
        )
        .unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.packages, vec!["git"]);
        assert_eq!(config.fonts.mode, FontsMode::Prompt);
        assert_eq!(config.fonts.url, defaults::FONTS_REPO);
        assert_eq!(config.tmux.script, PathBuf::from("setup/run.sh"));
        assert_eq!(config.editor, Config::default().editor);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pakages = [\"git\"]\n").unwrap();
        assert!(matches!(
            Config::load(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn empty_package_list_is_rejected() {
        let config = Config {
            packages: vec![],
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoPackages)));
    }

    #[test]
    fn escaping_paths_are_rejected() {
        for bad in ["/etc/vimrc", "../.vimrc", "a/../../b", ""] {
            let mut config = Config::default();
            config.editor.path = PathBuf::from(bad);
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidPath {
                        field: "editor.path",
                        ..
                    })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn nested_relative_paths_are_accepted() {
        let mut config = Config::default();
        config.editor.path = PathBuf::from(".config/nvim/init.vim");
        config.tmux.script = PathBuf::from("./scripts/install.sh");
        config.validate().unwrap();
    }

    #[test]
    fn resolve_rejects_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::resolve(Some(&missing), dir.path()),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn resolve_uses_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "packages = [\"zsh\"]\n").unwrap();
        let config = Config::resolve(Some(&path), dir.path()).unwrap();
        assert_eq!(config.packages, vec!["zsh"]);
    }

    #[test]
    fn fonts_entry_repo() {
        let repo = FontsEntry::default().repo();
        assert_eq!(repo.url, defaults::FONTS_REPO);
        assert_eq!(repo.script, PathBuf::from("install.sh"));
    }

    #[test]
    fn fonts_mode_display() {
        assert_eq!(FontsMode::Skip.to_string(), "skip");
        assert_eq!(FontsMode::Prompt.to_string(), "prompt");
        assert_eq!(FontsMode::Always.to_string(), "always");
    }
}
