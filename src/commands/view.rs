//! One-shot grid rendering to stdout.

use super::{build_view_state, resolve_timezone};
use crate::config::Config;
use crate::error::Result;
use crate::grid::render_grid;
use crate::model::Snapshot;
use crate::output::print_grid;
use std::path::PathBuf;

/// Options for the `view` command.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub snapshot: PathBuf,
    /// Force the collapsed view on (persisted as the new default, like
    /// checking the collapse box).
    pub collapsed: bool,
    /// Force the expanded view on (persisted likewise).
    pub expanded: bool,
    pub bv_filter: Option<String>,
    pub task_filter: Option<String>,
    /// Seed filters and skip from a full URL or query string.
    pub url: Option<String>,
    pub tz: Option<String>,
    /// Print per-task tooltip lines under each row.
    pub detail: bool,
}

pub fn view_command(options: ViewOptions) -> Result<()> {
    let config = Config::load()?;
    let snapshot = Snapshot::load(&options.snapshot)?;
    let tz = resolve_timezone(&snapshot, options.tz.as_deref(), &config);

    let mut state = build_view_state(&snapshot, options.url.as_deref())?;
    if options.collapsed {
        state.set_collapsed(true);
    } else if options.expanded {
        state.set_collapsed(false);
    }
    if let Some(filter) = &options.bv_filter {
        state.set_build_variant_filter(filter);
    }
    if let Some(filter) = &options.task_filter {
        state.set_task_filter(filter);
    }

    let grid = render_grid(&snapshot, &state, tz);
    let controls = state.page_controls(&snapshot);
    print_grid(&grid, &controls, options.detail);
    Ok(())
}
