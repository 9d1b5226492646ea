//! Task status classification.
//!
//! Maps a task's raw wire status plus execution metadata to the semantic
//! category display adapters color by, and to the human-readable label shown
//! in tooltips. Both functions are pure and total: a missing task yields the
//! neutral category/empty label instead of an error, so one corrupt record
//! degrades to a blank box rather than breaking the grid.

use crate::model::{Task, TaskStatus};
use chrono::DateTime;
use std::fmt;

/// Semantic display category for a task.
///
/// `Inactive`, `Unstarted` and `SystemFailed` are derived from raw status
/// plus metadata; the remaining variants pass the raw status through.
/// `None` is the neutral category for missing/unrecognizable tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Inactive,
    Unstarted,
    SystemFailed,
    Failed,
    Success,
    Started,
    Dispatched,
    Undispatched,
    None,
}

/// Statuses treated as "active" in the collapsed view: they stay visible as
/// individual task boxes instead of folding into the summary bar.
pub const DEFAULT_ACTIVE_STATUSES: [StatusCategory; 2] =
    [StatusCategory::Failed, StatusCategory::SystemFailed];

impl StatusCategory {
    /// Stable token for this category, used for color lookup by display
    /// adapters. The neutral category has no token.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Inactive => "inactive",
            StatusCategory::Unstarted => "unstarted",
            StatusCategory::SystemFailed => "system-failed",
            StatusCategory::Failed => "failed",
            StatusCategory::Success => "success",
            StatusCategory::Started => "started",
            StatusCategory::Dispatched => "dispatched",
            StatusCategory::Undispatched => "undispatched",
            StatusCategory::None => "",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a task into its display category.
///
/// Rules: `undispatched` splits on activation (inactive vs unstarted);
/// `failed` escalates to `system-failed` when the end details report a
/// system-side failure or a heartbeat timeout; everything else passes
/// through unchanged.
pub fn classify(task: Option<&Task>) -> StatusCategory {
    let task = match task {
        Some(task) => task,
        None => return StatusCategory::None,
    };

    match task.status {
        TaskStatus::Undispatched => {
            if task.activated {
                StatusCategory::Unstarted
            } else {
                StatusCategory::Inactive
            }
        }
        TaskStatus::Failed => match &task.task_end_details {
            Some(details) if details.is_system() || details.is_heartbeat_timeout() => {
                StatusCategory::SystemFailed
            }
            _ => StatusCategory::Failed,
        },
        TaskStatus::Started => StatusCategory::Started,
        TaskStatus::Dispatched => StatusCategory::Dispatched,
        TaskStatus::Success => StatusCategory::Success,
        TaskStatus::Unknown => StatusCategory::None,
    }
}

/// Human-readable status label for a task, shown in tooltips.
pub fn status_label(task: Option<&Task>) -> String {
    let task = match task {
        Some(task) => task,
        None => return String::new(),
    };

    if task.status == TaskStatus::Undispatched {
        if task.activated {
            if let Some(reason) = &task.task_waiting {
                return reason.clone();
            }
            return "scheduled".to_string();
        } else if dispatch_time_unset(task) {
            return "not scheduled".to_string();
        }
    }

    if task.status == TaskStatus::Failed {
        if let Some(details) = &task.task_end_details {
            if details.timed_out {
                if details.desc == "heartbeat" {
                    return "system unresponsive".to_string();
                }
                if details.is_system() {
                    return "system timed out".to_string();
                }
                return "test timed out".to_string();
            }
            if details.is_system() {
                return "system failure".to_string();
            }
        }
    }

    task.status.as_str().to_string()
}

/// True when the dispatch time is absent, the zero value, or unparsable —
/// all of which mean the task was never dispatched.
fn dispatch_time_unset(task: &Task) -> bool {
    let raw = match &task.dispatch_time {
        Some(raw) if !raw.is_empty() => raw,
        _ => return true,
    };
    if raw == "0" {
        return true;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.timestamp() <= 0,
        Err(_) => true,
    }
}
