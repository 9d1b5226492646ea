//! Collapsed-view aggregation.
//!
//! The collapsed view replaces individual task boxes with a per-build
//! summary bar of status counts. Counts come from the server's precomputed
//! `task_status_count` tally — the summary is authoritative input, never
//! recomputed by re-scanning the task list.

use crate::filter::filter_active_tasks;
use crate::model::{Build, Row};
use crate::status::StatusCategory;

/// One segment of a collapsed summary bar: a status category and how many
/// of the build's tasks landed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySegment {
    pub category: StatusCategory,
    pub count: u32,
}

/// Build the collapsed summary segments for a build.
///
/// Segment order is fixed: success, dispatched, system-failed,
/// undispatched, inactive, failed. Zero-count categories are dropped, as is
/// any category in `active_statuses` — those tasks render as individual
/// boxes next to the bar and must not be double-counted.
pub fn summarize(build: &Build, active_statuses: &[StatusCategory]) -> Vec<SummarySegment> {
    let counts = &build.task_status_count;

    let ordered = [
        (StatusCategory::Success, counts.succeeded),
        (StatusCategory::Dispatched, counts.started),
        (StatusCategory::SystemFailed, counts.timed_out),
        (StatusCategory::Undispatched, counts.undispatched),
        (StatusCategory::Inactive, counts.inactive),
        (StatusCategory::Failed, counts.failed),
    ];

    ordered
        .into_iter()
        .filter(|(category, count)| *count > 0 && !active_statuses.contains(category))
        .map(|(category, count)| SummarySegment { category, count })
        .collect()
}

/// True iff no build in the row has any task whose classified status is in
/// `active_statuses`. Decides whether a collapsed row renders a pure
/// summary bar or active task boxes overlaid on it.
pub fn is_row_fully_inactive(row: &Row, active_statuses: &[StatusCategory]) -> bool {
    row.builds
        .values()
        .all(|build| filter_active_tasks(&build.tasks, active_statuses).is_empty())
}
