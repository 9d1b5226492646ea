//! waterfall CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command handler.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use waterfall::commands::{
    completion_command, monitor_command, view_command, MonitorOptions, ViewOptions,
};
use waterfall::output::print_error;

#[derive(Parser)]
#[command(name = "waterfall")]
#[command(
    version,
    about = "Terminal dashboard for CI build waterfalls",
    after_help = "EXAMPLES:
    # Render a snapshot once (shorthand for `view <file>`)
    waterfall snapshot.json

    # Collapsed view, filtered to one variant family
    waterfall view snapshot.json --collapsed --bv-filter ubuntu

    # Restore the view a URL describes
    waterfall view snapshot.json --url '?bv_filter=rhel&skip=20'

    # Live grid with ticking ETAs
    waterfall monitor snapshot.json"
)]
struct Cli {
    /// Path to a snapshot JSON file (shorthand for `view <file>`)
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the waterfall grid once to stdout
    View {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,

        /// Show the collapsed view (persisted as the new default)
        #[arg(long, conflicts_with = "expanded")]
        collapsed: bool,

        /// Show the expanded view (persisted as the new default)
        #[arg(long)]
        expanded: bool,

        /// Filter build variants by name substring
        #[arg(long)]
        bv_filter: Option<String>,

        /// Filter tasks by name substring (expanded view only)
        #[arg(long)]
        task_filter: Option<String>,

        /// Seed filters and skip from a URL or query string
        #[arg(long)]
        url: Option<String>,

        /// Timezone for header timestamps ("UTC", "+09:00", ...)
        #[arg(long)]
        tz: Option<String>,

        /// Print per-task tooltip lines under each row
        #[arg(long)]
        detail: bool,
    },

    /// Watch a snapshot in a live TUI with ticking ETAs
    Monitor {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,

        /// Seed filters and skip from a URL or query string
        #[arg(long)]
        url: Option<String>,

        /// Timezone for header timestamps ("UTC", "+09:00", ...)
        #[arg(long)]
        tz: Option<String>,
    },

    /// Generate a shell completion script (bash, zsh, fish)
    Completion {
        /// Target shell; detected from $SHELL when omitted
        shell: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::View {
            snapshot,
            collapsed,
            expanded,
            bv_filter,
            task_filter,
            url,
            tz,
            detail,
        }) => view_command(ViewOptions {
            snapshot,
            collapsed,
            expanded,
            bv_filter,
            task_filter,
            url,
            tz,
            detail,
        }),
        Some(Commands::Monitor { snapshot, url, tz }) => monitor_command(MonitorOptions {
            snapshot,
            url,
            tz,
        }),
        Some(Commands::Completion { shell }) => {
            completion_command(shell.as_deref(), &mut Cli::command())
        }
        None => match cli.file {
            Some(file) => view_command(ViewOptions {
                snapshot: file,
                ..ViewOptions::default()
            }),
            None => {
                Cli::command().print_help().ok();
                return;
            }
        },
    };

    if let Err(err) = result {
        print_error(&err.to_string());
        std::process::exit(1);
    }
}
