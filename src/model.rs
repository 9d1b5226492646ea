//! Data model for a waterfall snapshot.
//!
//! A snapshot is the JSON document a CI server produces for one page of the
//! waterfall: the variant rows, the version columns, pagination metadata and
//! the server clock. Everything here is a read-only value deserialized once
//! per invocation; the only mutable state in the crate lives in
//! [`crate::view_state::ViewState`].

use crate::error::{Result, WaterfallError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Raw task status as reported by the CI server.
///
/// `inactive`, `unstarted` and `system-failed` are *derived* display
/// categories, never wire statuses; see [`crate::status::StatusCategory`].
/// Unrecognized strings deserialize to [`TaskStatus::Unknown`] so one bad
/// record cannot fail the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Undispatched,
    Dispatched,
    Started,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Wire-format name for this status. Unknown statuses have no name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Undispatched => "undispatched",
            TaskStatus::Dispatched => "dispatched",
            TaskStatus::Started => "started",
            TaskStatus::Success => "success",
            TaskStatus::Failed => "failed",
            TaskStatus::Unknown => "",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Unknown
    }
}

/// Execution-end metadata attached to failed tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEndDetails {
    /// Failure origin ("system" or a test-side value).
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub timed_out: bool,
    /// Timeout description; "heartbeat" marks an unresponsive host.
    #[serde(default)]
    pub desc: String,
}

impl TaskEndDetails {
    pub fn is_system(&self) -> bool {
        self.kind == "system"
    }

    pub fn is_heartbeat_timeout(&self) -> bool {
        self.timed_out && self.desc == "heartbeat"
    }
}

/// One task of one build. Immutable snapshot per render cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub activated: bool,
    /// RFC3339 dispatch time; the zero value ("0001-01-01T00:00:00Z") and
    /// unparsable strings both mean "never dispatched".
    #[serde(default)]
    pub dispatch_time: Option<String>,
    /// Start time in nanoseconds since the epoch.
    #[serde(default)]
    pub start_time: i64,
    /// Expected runtime in nanoseconds, from historical averages.
    #[serde(default)]
    pub expected_duration: i64,
    /// Actual runtime in nanoseconds; `None` until the task finishes.
    #[serde(default)]
    pub time_taken: Option<i64>,
    /// Paths of failed tests; only meaningful when status == failed.
    #[serde(default)]
    pub failed_test_names: Vec<String>,
    /// Reason string set while an activated task waits on a dependency.
    #[serde(default)]
    pub task_waiting: Option<String>,
    #[serde(default)]
    pub task_end_details: Option<TaskEndDetails>,
}

/// Precomputed per-build status tally. This is authoritative input from the
/// server; collapsed summaries read it instead of re-scanning the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(default)]
    pub succeeded: u32,
    #[serde(default)]
    pub started: u32,
    #[serde(default)]
    pub timed_out: u32,
    #[serde(default)]
    pub undispatched: u32,
    #[serde(default)]
    pub inactive: u32,
    #[serde(default)]
    pub failed: u32,
}

/// One version + variant intersection: a group of tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, alias = "taskStatusCount")]
    pub task_status_count: StatusCounts,
}

/// A column of the grid. When `rolled_up` is set this single entity stands
/// in for several inactive versions and the vectors below are parallel
/// arrays with one entry per collapsed version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub revisions: Vec<String>,
    #[serde(default)]
    pub create_times: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub rolled_up: bool,
}

impl Version {
    /// Id of the version heading this column, if any.
    pub fn head_id(&self) -> Option<&str> {
        self.ids.first().map(|s| s.as_str())
    }

    /// Number of versions this column represents after clamping to the
    /// shortest parallel array. Inconsistent entities render whatever all
    /// arrays can supply instead of panicking.
    pub fn len(&self) -> usize {
        self.ids
            .len()
            .min(self.authors.len())
            .min(self.messages.len())
            .min(self.revisions.len())
            .min(self.create_times.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the parallel arrays all have the same length.
    pub fn is_consistent(&self) -> bool {
        let n = self.ids.len();
        self.authors.len() == n
            && self.messages.len() == n
            && self.revisions.len() == n
            && self.create_times.len() == n
    }
}

/// Identity of a build variant (a grid row).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

/// One grid row: a build variant and its builds keyed by version id.
/// A missing entry means no build ran for that variant/version pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub build_variant: BuildVariant,
    #[serde(default)]
    pub builds: HashMap<String, Build>,
}

impl Row {
    /// Build for the version heading the given column, if one ran.
    pub fn build_for(&self, version: &Version) -> Option<&Build> {
        version.head_id().and_then(|id| self.builds.get(id))
    }
}

/// One page of waterfall data as produced by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub project: String,
    /// Timezone identifier for header timestamps ("UTC", "+09:00", ...).
    #[serde(default)]
    pub user_tz: String,
    /// Server clock in nanoseconds since the epoch; ETA math is anchored
    /// here, never on the local clock.
    #[serde(default)]
    pub current_time: i64,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub current_skip: i64,
    #[serde(default)]
    pub previous_page_count: i64,
    #[serde(default)]
    pub total_versions: i64,
}

impl Snapshot {
    /// Load a snapshot document from disk.
    pub fn load(path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            return Err(WaterfallError::SnapshotNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Number of versions represented on this page. A rolled-up column
    /// counts every collapsed version it stands in for, so this is the sum
    /// of author-list lengths, not the column count.
    pub fn versions_on_page(&self) -> i64 {
        self.versions.iter().map(|v| v.authors.len() as i64).sum()
    }
}
