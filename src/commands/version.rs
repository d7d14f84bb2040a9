//! Command: print version information.

/// Print the devsetup version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("devsetup {}", super::version_string());
}
