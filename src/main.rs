//! `devsetup` binary entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use devsetup_cli::cli::{Cli, Command};
use devsetup_cli::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.resolved_command() {
        Command::Install => {
            let log_file = logging::init_subscriber(args.verbose, "install");
            let log = Arc::new(logging::Logger::new(log_file));
            commands::install::run(&args.global, &log)
        }
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
