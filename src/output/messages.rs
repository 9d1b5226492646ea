//! Error, warning, and info messages.

use super::colors::*;

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{RED}error:{RESET} {}", message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{YELLOW}warning:{RESET} {}", message);
}

/// Print an informational message.
pub fn print_info(message: &str) {
    println!("{CYAN}{}{RESET}", message);
}
