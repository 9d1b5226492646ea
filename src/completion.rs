//! Shell completion infrastructure.
//!
//! Provides shell detection from `$SHELL` and completion script generation
//! for bash, zsh and fish via clap_complete.

use crate::error::{Result, WaterfallError};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

pub const SUPPORTED_SHELLS: [ShellType; 3] = [ShellType::Bash, ShellType::Zsh, ShellType::Fish];

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        WaterfallError::ShellCompletion(
            "$SHELL environment variable is not set. \
             Please specify your shell manually."
                .to_string(),
        )
    })?;

    parse_shell_from_path(&shell_path)
}

/// Parse a shell type from a shell path like `/bin/zsh`.
pub fn parse_shell_from_path(shell_path: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell_path);

    match shell_name {
        "bash" => Ok(ShellType::Bash),
        "zsh" => Ok(ShellType::Zsh),
        "fish" => Ok(ShellType::Fish),
        _ => Err(WaterfallError::ShellCompletion(format!(
            "Unsupported shell: '{}'. Supported shells are: bash, zsh, fish.",
            shell_name
        ))),
    }
}

/// Write the completion script for a shell to the given writer.
pub fn write_completion_script(
    shell: ShellType,
    cli: &mut Command,
    out: &mut dyn Write,
) -> Result<()> {
    generate(shell.to_clap_shell(), cli, "waterfall", out);
    Ok(())
}

/// Print the completion script for a shell to stdout.
pub fn print_completion_script(shell: ShellType, cli: &mut Command) -> Result<()> {
    let mut stdout = std::io::stdout();
    write_completion_script(shell, cli, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cli() -> Command {
        Command::new("waterfall").subcommand(Command::new("view"))
    }

    #[test]
    fn test_parse_shell_from_path() {
        assert_eq!(parse_shell_from_path("/bin/bash").unwrap(), ShellType::Bash);
        assert_eq!(parse_shell_from_path("/usr/bin/zsh").unwrap(), ShellType::Zsh);
        assert_eq!(
            parse_shell_from_path("/usr/local/bin/fish").unwrap(),
            ShellType::Fish
        );
    }

    #[test]
    fn test_parse_shell_bare_name() {
        assert_eq!(parse_shell_from_path("zsh").unwrap(), ShellType::Zsh);
    }

    #[test]
    fn test_parse_shell_unsupported() {
        let err = parse_shell_from_path("/bin/tcsh").unwrap_err();
        assert!(matches!(err, WaterfallError::ShellCompletion(_)));
    }

    #[test]
    fn test_shell_type_display() {
        assert_eq!(ShellType::Bash.to_string(), "bash");
        assert_eq!(ShellType::Zsh.to_string(), "zsh");
        assert_eq!(ShellType::Fish.to_string(), "fish");
    }

    #[test]
    fn test_write_completion_script_produces_output() {
        for shell in SUPPORTED_SHELLS {
            let mut buf = Vec::new();
            write_completion_script(shell, &mut test_cli(), &mut buf).unwrap();
            assert!(!buf.is_empty(), "{} script should not be empty", shell);
        }
    }
}
