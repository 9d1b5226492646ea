//! Terminal output formatting.
//!
//! This module provides consistent, colored stdout output for the one-shot
//! `view` command:
//!
//! - [`grid`] - Waterfall grid printing
//! - [`messages`] - Error, warning, and info messages

pub mod grid;
pub mod messages;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

// Re-export colors at module level for convenience
pub use colors::*;

pub use grid::{category_color, print_grid};
pub use messages::{print_error, print_info, print_warning};
