//! Built-in values used when no configuration file overrides them.

/// Packages installed by default.
pub const PACKAGES: &[&str] = &["git", "vim", "tmux", "curl", "zsh", "python3", "flatpak"];

/// Editor configuration target, relative to the home directory.
pub const EDITOR_PATH: &str = ".vimrc";

/// Shell configuration target, relative to the home directory.
pub const SHELL_PATH: &str = ".zshrc";

/// Shell framework install directory, relative to the home directory.
pub const SHELL_FRAMEWORK_DIR: &str = ".oh-my-zsh";

/// Upstream oh-my-zsh installer.
pub const SHELL_FRAMEWORK_INSTALLER: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// tmux configuration repository and its install script.
pub const TMUX_REPO: &str = "https://github.com/samoshkin/tmux-config.git";
/// Script run inside the tmux configuration clone.
pub const TMUX_SCRIPT: &str = "install.sh";

/// Nerd Fonts repository and its install script.
pub const FONTS_REPO: &str = "https://github.com/ryanoasis/nerd-fonts.git";
/// Script run inside the Nerd Fonts clone.
pub const FONTS_SCRIPT: &str = "install.sh";

/// Lines appended to the editor configuration.
pub const EDITOR_CONTENT: &str = r#"" added by devsetup
set nocompatible
syntax on
filetype plugin indent on
set number
set relativenumber
set expandtab
set tabstop=4
set shiftwidth=4
set autoindent
set hlsearch
set incsearch
set ignorecase
set smartcase
set mouse=a
set clipboard=unnamedplus"#;

/// Lines appended to the shell configuration.
pub const SHELL_CONTENT: &str = r#"# added by devsetup
export ZSH="$HOME/.oh-my-zsh"
ZSH_THEME="robbyrussell"
plugins=(git python tmux)
source "$ZSH/oh-my-zsh.sh"
export EDITOR=vim
alias ll='ls -alF'
alias la='ls -A'"#;
