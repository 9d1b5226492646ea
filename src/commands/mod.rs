//! CLI command handlers.
//!
//! Each command has its own module with a handler function:
//!
//! - [`view`] - Render a snapshot grid once to stdout
//! - [`monitor`] - Live TUI with ticking ETAs
//! - [`completion`] - Shell completion scripts

mod completion;
mod monitor;
mod view;

pub use completion::completion_command;
pub use monitor::{monitor_command, MonitorOptions};
pub use view::{view_command, ViewOptions};

use crate::config::{prefs_path, Config};
use crate::error::Result;
use crate::model::Snapshot;
use crate::query::{waterfall_base, QueryParams};
use crate::timefmt::Timezone;
use crate::view_state::{FilePrefStore, MemoryUrlState, ViewState};

/// Mount a view state for a loaded snapshot: collapsed flag restored from
/// the durable preference file, filters seeded from `--url` (if any), and
/// the pagination offset adopted from the snapshot.
fn build_view_state(snapshot: &Snapshot, url_arg: Option<&str>) -> Result<ViewState> {
    let base = waterfall_base(&snapshot.project);
    let params = url_arg.map(QueryParams::parse).unwrap_or_default();

    let store = FilePrefStore::load(prefs_path()?);
    let url_state = MemoryUrlState::with_params(&base, params);

    let mut state = ViewState::new(Box::new(store), Box::new(url_state));
    state.set_skip_from_data(snapshot.current_skip);
    Ok(state)
}

/// Pick the display timezone: an explicit flag wins, then the snapshot's
/// own identifier, then the configured default.
fn resolve_timezone(snapshot: &Snapshot, tz_arg: Option<&str>, config: &Config) -> Timezone {
    if let Some(tz) = tz_arg {
        return Timezone::parse(tz);
    }
    if !snapshot.user_tz.is_empty() {
        return Timezone::parse(&snapshot.user_tz);
    }
    Timezone::parse(&config.timezone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_timezone_flag_wins() {
        let snapshot = Snapshot {
            user_tz: "+05:00".to_string(),
            ..Snapshot::default()
        };
        let config = Config::default();
        let tz = resolve_timezone(&snapshot, Some("+09:00"), &config);
        assert_eq!(tz, Timezone::parse("+09:00"));
    }

    #[test]
    fn test_resolve_timezone_snapshot_over_config() {
        let snapshot = Snapshot {
            user_tz: "+05:00".to_string(),
            ..Snapshot::default()
        };
        let config = Config::default();
        assert_eq!(
            resolve_timezone(&snapshot, None, &config),
            Timezone::parse("+05:00")
        );
    }

    #[test]
    fn test_resolve_timezone_config_fallback() {
        let snapshot = Snapshot::default();
        let config = Config {
            timezone: "-08:00".to_string(),
            ..Config::default()
        };
        assert_eq!(
            resolve_timezone(&snapshot, None, &config),
            Timezone::parse("-08:00")
        );
    }
}
