//! Shell completion command.

use crate::completion::{detect_shell, parse_shell_from_path, print_completion_script};
use crate::error::Result;
use clap::Command;

/// Generate a completion script for the given shell (detected from
/// `$SHELL` when omitted) and print it to stdout.
pub fn completion_command(shell: Option<&str>, cli: &mut Command) -> Result<()> {
    let shell = match shell {
        Some(name) => parse_shell_from_path(name)?,
        None => detect_shell()?,
    };
    print_completion_script(shell, cli)
}
