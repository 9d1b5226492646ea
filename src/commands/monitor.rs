//! Live TUI monitor command.

use super::{build_view_state, resolve_timezone};
use crate::config::Config;
use crate::error::Result;
use crate::model::Snapshot;
use crate::monitor::run_monitor;
use std::path::PathBuf;

/// Options for the `monitor` command.
#[derive(Debug, Clone, Default)]
pub struct MonitorOptions {
    pub snapshot: PathBuf,
    /// Seed filters and skip from a full URL or query string.
    pub url: Option<String>,
    pub tz: Option<String>,
}

pub fn monitor_command(options: MonitorOptions) -> Result<()> {
    let config = Config::load()?;
    let snapshot = Snapshot::load(&options.snapshot)?;
    let tz = resolve_timezone(&snapshot, options.tz.as_deref(), &config);
    let state = build_view_state(&snapshot, options.url.as_deref())?;

    run_monitor(snapshot, state, tz, config.poll_interval_secs)
}
