//! Monitor TUI - a live terminal view of one waterfall page.
//!
//! Renders the grid and redraws it on a steady tick so in-progress task
//! ETAs count down in place. The interface is read-only over the build
//! data; keyboard input drives the view state:
//! - c: toggle the collapsed view
//! - /: edit the build variant filter
//! - t: edit the task filter (expanded view only)
//! - m: toggle commit-message shortening
//! - n / p: older / newer page offsets
//! - Arrow keys: move the cell selection
//! - q: quit

pub mod app;

pub use app::{run_monitor, WaterfallApp};
