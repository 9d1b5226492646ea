//! Row and task filtering predicates.
//!
//! Filters are case-insensitive substring matches; an empty filter matches
//! everything. The task filter only applies in the expanded view — collapsed
//! cells aggregate all tasks regardless of it.

use crate::model::Task;
use crate::status::{classify, StatusCategory};

/// Does a build variant's display name survive the variant filter?
pub fn matches_variant_filter(display_name: &str, filter_text: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }
    display_name
        .to_lowercase()
        .contains(&filter_text.to_lowercase())
}

/// Does a task's display name survive the task filter?
pub fn matches_task_filter(task_display_name: &str, filter_text: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }
    task_display_name
        .to_lowercase()
        .contains(&filter_text.to_lowercase())
}

/// Tasks whose *classified* status is in the active-status set. These are
/// the tasks that stay visible as individual boxes in the collapsed view.
pub fn filter_active_tasks<'a>(
    tasks: &'a [Task],
    active_statuses: &[StatusCategory],
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| active_statuses.contains(&classify(Some(task))))
        .collect()
}
