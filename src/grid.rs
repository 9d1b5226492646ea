//! Grid rendering: the composition root of the waterfall core.
//!
//! `render_grid` consumes a snapshot plus the current view state and
//! produces a pure render model — headers, rows, cells, task boxes and
//! tooltips — with no terminal concern. Display adapters (the stdout
//! printer and the live TUI) walk this model; the TUI additionally keeps a
//! ticker per started task and substitutes live ETA labels at draw time.

use crate::aggregate::{is_row_fully_inactive, summarize, SummarySegment};
use crate::countdown::{initial_eta_nanos, CountdownClock};
use crate::filter::{filter_active_tasks, matches_task_filter, matches_variant_filter};
use crate::model::{Snapshot, Task, TaskStatus, Version};
use crate::query::{build_link, build_variant_link, task_link, version_link};
use crate::status::{classify, status_label, StatusCategory, DEFAULT_ACTIVE_STATUSES};
use crate::timefmt::{basename, format_duration_or_unknown, format_timestamp, Timezone};
use crate::view_state::ViewState;

/// Failed-test names shown in a tooltip before collapsing to a count.
const MAX_FAILED_TEST_DISPLAY: usize = 5;

/// Commit messages longer than this are shortened in headers.
const MAX_COMMIT_MESSAGE_CHARS: usize = 44;

/// Header timestamp pattern ("5/7/96 1:15 AM").
pub const HEADER_TIME_PATTERN: &str = "M/D/YY h:mm A";

/// Message shown instead of the grid when the snapshot has no rows at all.
pub const NO_BUILDS_MESSAGE: &str = "There are no builds for this project.";

/// Failed-test portion of a task tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedTestDisplay {
    /// Nothing to show (not failed, or no recorded test names).
    None,
    /// Individual test basenames, at most [`MAX_FAILED_TEST_DISPLAY`].
    Names(Vec<String>),
    /// Too many to list; show "<N> failed tests".
    Count(usize),
}

/// Tooltip content for one task box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTooltip {
    /// "display_name - label", plus " - <duration>" for finished tasks.
    pub top_line: String,
    /// ETA string for started tasks, as of this render.
    pub eta: Option<String>,
    pub failed_tests: FailedTestDisplay,
}

/// One task box in a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBox {
    pub task_id: String,
    pub link: String,
    pub category: StatusCategory,
    /// Countdown budget for started tasks; display adapters seed their
    /// live tickers from this.
    pub eta_nanos: Option<i64>,
    pub tooltip: TaskTooltip,
}

/// Body of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    /// The column is a rolled-up run of inactive versions.
    RolledUp,
    /// No build ran for this variant/version pair; explicit placeholder.
    Missing,
    /// Collapsed view: a summary bar, plus still-active task boxes unless
    /// the whole row is inactive.
    Collapsed {
        segments: Vec<SummarySegment>,
        active_tasks: Vec<TaskBox>,
    },
    /// Expanded view: every task surviving the task filter.
    Active { tasks: Vec<TaskBox> },
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub build_id: Option<String>,
    pub build_link: Option<String>,
    pub kind: CellKind,
}

/// One variant row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub variant_id: String,
    pub variant_name: String,
    pub variant_link: String,
    pub cells: Vec<Cell>,
}

/// Per-version summary inside a rolled-up header popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledUpVersionSummary {
    pub version_id: String,
    pub link: String,
    /// Revision truncated to 10 chars.
    pub commit: String,
    pub author: String,
    pub message: String,
    pub formatted_time: String,
}

/// A column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionHeader {
    Active {
        version_id: String,
        link: String,
        /// Revision truncated to 5 chars.
        commit: String,
        author: String,
        /// Commit message, possibly shortened to fit.
        message: String,
        /// True when the full message exceeds the display limit, so the
        /// adapter offers a more/less toggle.
        expandable: bool,
        formatted_time: String,
    },
    RolledUp {
        /// "<N> inactive version(s)".
        title: String,
        summaries: Vec<RolledUpVersionSummary>,
    },
}

/// The full render model for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub project: String,
    /// True when the snapshot carried no rows at all; adapters render
    /// [`NO_BUILDS_MESSAGE`] instead of the grid.
    pub no_builds: bool,
    pub headers: Vec<VersionHeader>,
    pub rows: Vec<RowView>,
}

/// Render the grid for a snapshot under the given view state.
pub fn render_grid(snapshot: &Snapshot, state: &ViewState, tz: Timezone) -> GridView {
    let headers = snapshot
        .versions
        .iter()
        .map(|version| render_header(version, state.shorten_commit_message(), tz))
        .collect();

    let rows = snapshot
        .rows
        .iter()
        .filter(|row| {
            matches_variant_filter(&row.build_variant.display_name, state.build_variant_filter())
        })
        .map(|row| {
            let fully_inactive = state.collapsed()
                && is_row_fully_inactive(row, &DEFAULT_ACTIVE_STATUSES);

            let cells = snapshot
                .versions
                .iter()
                .map(|version| render_cell(row, version, snapshot, state, fully_inactive))
                .collect();

            RowView {
                variant_id: row.build_variant.id.clone(),
                variant_name: row.build_variant.display_name.clone(),
                variant_link: build_variant_link(&snapshot.project, &row.build_variant.id),
                cells,
            }
        })
        .collect();

    GridView {
        project: snapshot.project.clone(),
        no_builds: snapshot.rows.is_empty(),
        headers,
        rows,
    }
}

fn render_cell(
    row: &crate::model::Row,
    version: &Version,
    snapshot: &Snapshot,
    state: &ViewState,
    row_fully_inactive: bool,
) -> Cell {
    if version.rolled_up {
        return Cell {
            build_id: None,
            build_link: None,
            kind: CellKind::RolledUp,
        };
    }

    let build = match row.build_for(version) {
        Some(build) => build,
        None => {
            return Cell {
                build_id: None,
                build_link: None,
                kind: CellKind::Missing,
            }
        }
    };

    let kind = if state.collapsed() {
        let segments = summarize(build, &DEFAULT_ACTIVE_STATUSES);
        let active_tasks = if row_fully_inactive {
            Vec::new()
        } else {
            filter_active_tasks(&build.tasks, &DEFAULT_ACTIVE_STATUSES)
                .into_iter()
                .map(|task| render_task_box(task, snapshot.current_time))
                .collect()
        };
        CellKind::Collapsed {
            segments,
            active_tasks,
        }
    } else {
        let tasks = build
            .tasks
            .iter()
            .filter(|task| matches_task_filter(&task.display_name, state.task_filter()))
            .map(|task| render_task_box(task, snapshot.current_time))
            .collect();
        CellKind::Active { tasks }
    };

    Cell {
        build_id: Some(build.id.clone()),
        build_link: Some(build_link(&build.id)),
        kind,
    }
}

fn render_task_box(task: &Task, current_time: i64) -> TaskBox {
    let eta_nanos = (task.status == TaskStatus::Started)
        .then(|| initial_eta_nanos(task.expected_duration, task.start_time, current_time));

    TaskBox {
        task_id: task.id.clone(),
        link: task_link(&task.id),
        category: classify(Some(task)),
        eta_nanos,
        tooltip: render_tooltip(task, eta_nanos),
    }
}

fn render_tooltip(task: &Task, eta_nanos: Option<i64>) -> TaskTooltip {
    let mut top_line = format!("{} - {}", task.display_name, status_label(Some(task)));
    if task.status == TaskStatus::Success || task.status == TaskStatus::Failed {
        top_line.push_str(" - ");
        top_line.push_str(&format_duration_or_unknown(task.time_taken, false, false));
    }

    let failed_tests = if task.status != TaskStatus::Failed || task.failed_test_names.is_empty() {
        FailedTestDisplay::None
    } else if task.failed_test_names.len() > MAX_FAILED_TEST_DISPLAY {
        FailedTestDisplay::Count(task.failed_test_names.len())
    } else {
        FailedTestDisplay::Names(
            task.failed_test_names
                .iter()
                .map(|name| basename(name).to_string())
                .collect(),
        )
    };

    TaskTooltip {
        top_line,
        eta: eta_nanos.map(|nanos| CountdownClock::new(nanos).eta_label()),
        failed_tests,
    }
}

fn render_header(version: &Version, shorten_commit_message: bool, tz: Timezone) -> VersionHeader {
    if !version.rolled_up && version.len() >= 1 {
        let full_message = &version.messages[0];
        let expandable = full_message.chars().count() > MAX_COMMIT_MESSAGE_CHARS;
        let message = if expandable && shorten_commit_message {
            let head: String = full_message
                .chars()
                .take(MAX_COMMIT_MESSAGE_CHARS - 3)
                .collect();
            format!("{}...", head)
        } else {
            full_message.clone()
        };

        return VersionHeader::Active {
            version_id: version.ids[0].clone(),
            link: version_link(&version.ids[0]),
            commit: version.revisions[0].chars().take(5).collect(),
            author: version.authors[0].clone(),
            message,
            expandable,
            formatted_time: format_timestamp(version.create_times[0], tz, HEADER_TIME_PATTERN),
        };
    }

    // Rolled-up column (or a defensively degenerate active one).
    let count = version.messages.len().max(version.len());
    let noun = if count == 1 { "version" } else { "versions" };
    let summaries = (0..version.len())
        .map(|i| RolledUpVersionSummary {
            version_id: version.ids[i].clone(),
            link: version_link(&version.ids[i]),
            commit: version.revisions[i].chars().take(10).collect(),
            author: version.authors[i].clone(),
            message: version.messages[i].clone(),
            formatted_time: format_timestamp(version.create_times[i], tz, HEADER_TIME_PATTERN),
        })
        .collect();

    VersionHeader::RolledUp {
        title: format!("{} inactive {}", count, noun),
        summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Build, BuildVariant, Row, StatusCounts, TaskEndDetails};
    use crate::query::QueryParams;
    use crate::view_state::{MemoryPrefStore, MemoryUrlState, ViewState};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    const NS_PER_SEC: i64 = 1_000_000_000;

    fn state() -> ViewState {
        ViewState::new(
            Box::new(MemoryPrefStore::new()),
            Box::new(MemoryUrlState::new("/waterfall/mci")),
        )
    }

    fn state_with(params: QueryParams, collapsed: bool) -> ViewState {
        let mut s = ViewState::new(
            Box::new(MemoryPrefStore::new()),
            Box::new(MemoryUrlState::with_params("/waterfall/mci", params)),
        );
        if collapsed {
            s.set_collapsed(true);
        }
        s
    }

    fn version(id: &str, message: &str) -> Version {
        Version {
            ids: vec![id.to_string()],
            authors: vec!["sam.k".to_string()],
            messages: vec![message.to_string()],
            revisions: vec!["0123456789abcdef".to_string()],
            create_times: vec![Utc.with_ymd_and_hms(1996, 5, 7, 1, 15, 0).unwrap()],
            rolled_up: false,
        }
    }

    fn rolled_up_version(ids: &[&str]) -> Version {
        Version {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            authors: ids.iter().map(|_| "sam.k".to_string()).collect(),
            messages: ids.iter().map(|_| "inactive change".to_string()).collect(),
            revisions: ids.iter().map(|_| "fedcba9876543210".to_string()).collect(),
            create_times: ids
                .iter()
                .map(|_| Utc.with_ymd_and_hms(1996, 5, 7, 1, 15, 0).unwrap())
                .collect(),
            rolled_up: true,
        }
    }

    fn task(id: &str, name: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            display_name: name.to_string(),
            status,
            ..Task::default()
        }
    }

    fn row(variant_name: &str, builds: Vec<(&str, Build)>) -> Row {
        Row {
            build_variant: BuildVariant {
                id: variant_name.to_lowercase().replace(' ', "-"),
                display_name: variant_name.to_string(),
            },
            builds: builds
                .into_iter()
                .map(|(id, b)| (id.to_string(), b))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn simple_snapshot() -> Snapshot {
        let build = Build {
            id: "b1".to_string(),
            tasks: vec![
                task("t1", "compile", TaskStatus::Success),
                task("t2", "lint", TaskStatus::Failed),
            ],
            task_status_count: StatusCounts {
                succeeded: 1,
                failed: 1,
                ..StatusCounts::default()
            },
        };
        Snapshot {
            project: "mci".to_string(),
            versions: vec![version("v1", "Fix the frobnicator")],
            rows: vec![row("Ubuntu 16.04", vec![("v1", build)])],
            total_versions: 50,
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_variant_filter_keeps_matching_row() {
        let grid = render_grid(
            &simple_snapshot(),
            &state_with(QueryParams::new("ubuntu", "", 0), false),
            Timezone::utc(),
        );
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].variant_name, "Ubuntu 16.04");
    }

    #[test]
    fn test_variant_filter_excludes_row() {
        let grid = render_grid(
            &simple_snapshot(),
            &state_with(QueryParams::new("windows", "", 0), false),
            Timezone::utc(),
        );
        assert!(grid.rows.is_empty());
        assert!(!grid.no_builds);
    }

    #[test]
    fn test_no_builds_flag_for_empty_snapshot() {
        let snapshot = Snapshot {
            project: "mci".to_string(),
            ..Snapshot::default()
        };
        let grid = render_grid(&snapshot, &state(), Timezone::utc());
        assert!(grid.no_builds);
        assert_eq!(NO_BUILDS_MESSAGE, "There are no builds for this project.");
    }

    #[test]
    fn test_expanded_cell_lists_all_tasks() {
        let grid = render_grid(&simple_snapshot(), &state(), Timezone::utc());
        match &grid.rows[0].cells[0].kind {
            CellKind::Active { tasks } => {
                assert_eq!(tasks.len(), 2);
                assert_eq!(tasks[0].link, "/task/t1");
                assert_eq!(tasks[0].category, StatusCategory::Success);
                assert_eq!(tasks[1].category, StatusCategory::Failed);
            }
            other => panic!("expected active cell, got {:?}", other),
        }
    }

    #[test]
    fn test_task_filter_narrows_expanded_cell() {
        let grid = render_grid(
            &simple_snapshot(),
            &state_with(QueryParams::new("", "lint", 0), false),
            Timezone::utc(),
        );
        match &grid.rows[0].cells[0].kind {
            CellKind::Active { tasks } => {
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].task_id, "t2");
            }
            other => panic!("expected active cell, got {:?}", other),
        }
    }

    #[test]
    fn test_collapsed_cell_with_active_overlay() {
        let grid = render_grid(
            &simple_snapshot(),
            &state_with(QueryParams::default(), true),
            Timezone::utc(),
        );
        match &grid.rows[0].cells[0].kind {
            CellKind::Collapsed {
                segments,
                active_tasks,
            } => {
                // the failed count folds out of the bar, the failed task
                // box rides on top
                assert_eq!(segments.len(), 1);
                assert_eq!(segments[0].category, StatusCategory::Success);
                assert_eq!(active_tasks.len(), 1);
                assert_eq!(active_tasks[0].task_id, "t2");
            }
            other => panic!("expected collapsed cell, got {:?}", other),
        }
    }

    #[test]
    fn test_collapsed_fully_inactive_row_has_no_overlay() {
        let build = Build {
            id: "b1".to_string(),
            tasks: vec![task("t1", "compile", TaskStatus::Success)],
            task_status_count: StatusCounts {
                succeeded: 1,
                ..StatusCounts::default()
            },
        };
        let snapshot = Snapshot {
            project: "mci".to_string(),
            versions: vec![version("v1", "msg")],
            rows: vec![row("OSX", vec![("v1", build)])],
            ..Snapshot::default()
        };
        let grid = render_grid(
            &snapshot,
            &state_with(QueryParams::default(), true),
            Timezone::utc(),
        );
        match &grid.rows[0].cells[0].kind {
            CellKind::Collapsed { active_tasks, .. } => assert!(active_tasks.is_empty()),
            other => panic!("expected collapsed cell, got {:?}", other),
        }
    }

    #[test]
    fn test_collapsed_ignores_task_filter() {
        let grid = render_grid(
            &simple_snapshot(),
            &state_with(QueryParams::new("", "no-such-task", 0), true),
            Timezone::utc(),
        );
        match &grid.rows[0].cells[0].kind {
            CellKind::Collapsed { active_tasks, .. } => {
                assert_eq!(active_tasks.len(), 1);
            }
            other => panic!("expected collapsed cell, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_build_renders_placeholder() {
        let mut snapshot = simple_snapshot();
        snapshot.versions.push(version("v2", "another change"));
        let grid = render_grid(&snapshot, &state(), Timezone::utc());
        assert_eq!(grid.rows[0].cells.len(), 2);
        assert_eq!(grid.rows[0].cells[1].kind, CellKind::Missing);
        assert!(grid.rows[0].cells[1].build_id.is_none());
    }

    #[test]
    fn test_rolled_up_cell() {
        let mut snapshot = simple_snapshot();
        snapshot.versions.push(rolled_up_version(&["v2", "v3"]));
        let grid = render_grid(&snapshot, &state(), Timezone::utc());
        assert_eq!(grid.rows[0].cells[1].kind, CellKind::RolledUp);
    }

    #[test]
    fn test_variant_link() {
        let grid = render_grid(&simple_snapshot(), &state(), Timezone::utc());
        assert_eq!(
            grid.rows[0].variant_link,
            "/build_variant/mci/ubuntu-16.04"
        );
    }

    #[test]
    fn test_active_header_fields() {
        let grid = render_grid(&simple_snapshot(), &state(), Timezone::utc());
        match &grid.headers[0] {
            VersionHeader::Active {
                version_id,
                link,
                commit,
                author,
                message,
                expandable,
                formatted_time,
            } => {
                assert_eq!(version_id, "v1");
                assert_eq!(link, "/version/v1");
                assert_eq!(commit, "01234");
                assert_eq!(author, "sam.k");
                assert_eq!(message, "Fix the frobnicator");
                assert!(!*expandable);
                assert_eq!(formatted_time, "5/7/96 1:15 AM");
            }
            other => panic!("expected active header, got {:?}", other),
        }
    }

    #[test]
    fn test_long_commit_message_is_shortened() {
        let long = "This commit message is definitely longer than forty-four characters total";
        let mut snapshot = simple_snapshot();
        snapshot.versions[0] = version("v1", long);

        let grid = render_grid(&snapshot, &state(), Timezone::utc());
        match &grid.headers[0] {
            VersionHeader::Active {
                message,
                expandable,
                ..
            } => {
                assert!(*expandable);
                assert!(message.ends_with("..."));
                assert_eq!(message.chars().count(), MAX_COMMIT_MESSAGE_CHARS);
            }
            other => panic!("expected active header, got {:?}", other),
        }

        // with shortening toggled off the full message comes through
        let mut expanded = state();
        expanded.toggle_shorten_commit_message();
        let grid = render_grid(&snapshot, &expanded, Timezone::utc());
        match &grid.headers[0] {
            VersionHeader::Active {
                message,
                expandable,
                ..
            } => {
                assert!(*expandable);
                assert_eq!(message, long);
            }
            other => panic!("expected active header, got {:?}", other),
        }
    }

    #[test]
    fn test_rolled_up_header_title_and_summaries() {
        let mut snapshot = simple_snapshot();
        snapshot.versions = vec![rolled_up_version(&["v2", "v3", "v4"])];
        let grid = render_grid(&snapshot, &state(), Timezone::utc());
        match &grid.headers[0] {
            VersionHeader::RolledUp { title, summaries } => {
                assert_eq!(title, "3 inactive versions");
                assert_eq!(summaries.len(), 3);
                assert_eq!(summaries[0].commit, "fedcba9876");
                assert_eq!(summaries[0].link, "/version/v2");
            }
            other => panic!("expected rolled-up header, got {:?}", other),
        }
    }

    #[test]
    fn test_rolled_up_header_singular_title() {
        let mut snapshot = simple_snapshot();
        snapshot.versions = vec![rolled_up_version(&["v2"])];
        let grid = render_grid(&snapshot, &state(), Timezone::utc());
        match &grid.headers[0] {
            VersionHeader::RolledUp { title, .. } => assert_eq!(title, "1 inactive version"),
            other => panic!("expected rolled-up header, got {:?}", other),
        }
    }

    #[test]
    fn test_tooltip_duration_for_finished_tasks() {
        let mut t = task("t1", "compile", TaskStatus::Success);
        t.time_taken = Some(92 * NS_PER_SEC);
        let tooltip = render_tooltip(&t, None);
        assert_eq!(tooltip.top_line, "compile - success - 1m 32s");

        let t = task("t1", "compile", TaskStatus::Failed);
        let tooltip = render_tooltip(&t, None);
        assert_eq!(tooltip.top_line, "compile - failed - unknown");
    }

    #[test]
    fn test_tooltip_no_duration_for_unfinished_tasks() {
        let t = task("t1", "compile", TaskStatus::Started);
        let tooltip = render_tooltip(&t, None);
        assert_eq!(tooltip.top_line, "compile - started");
    }

    #[test]
    fn test_tooltip_failed_tests_listed_as_basenames() {
        let mut t = task("t1", "unit", TaskStatus::Failed);
        t.failed_test_names = vec![
            "/data/jstests/core/or1.js".to_string(),
            "tests\\windows\\or2.js".to_string(),
        ];
        let tooltip = render_tooltip(&t, None);
        assert_eq!(
            tooltip.failed_tests,
            FailedTestDisplay::Names(vec!["or1.js".to_string(), "or2.js".to_string()])
        );
    }

    #[test]
    fn test_tooltip_failed_tests_capped_at_count() {
        let mut t = task("t1", "unit", TaskStatus::Failed);
        t.failed_test_names = (0..7).map(|i| format!("/tests/t{}.js", i)).collect();
        let tooltip = render_tooltip(&t, None);
        assert_eq!(tooltip.failed_tests, FailedTestDisplay::Count(7));
    }

    #[test]
    fn test_tooltip_failed_tests_ignored_for_system_failures_without_names() {
        let mut t = task("t1", "unit", TaskStatus::Failed);
        t.task_end_details = Some(TaskEndDetails {
            kind: "system".to_string(),
            timed_out: false,
            desc: String::new(),
        });
        let tooltip = render_tooltip(&t, None);
        assert_eq!(tooltip.failed_tests, FailedTestDisplay::None);
    }

    #[test]
    fn test_started_task_gets_eta() {
        let mut t = task("t1", "compile", TaskStatus::Started);
        t.start_time = 100 * NS_PER_SEC;
        t.expected_duration = 90 * NS_PER_SEC;

        let snapshot = Snapshot {
            project: "mci".to_string(),
            current_time: 130 * NS_PER_SEC,
            versions: vec![version("v1", "msg")],
            rows: vec![row(
                "Ubuntu 16.04",
                vec![(
                    "v1",
                    Build {
                        id: "b1".to_string(),
                        tasks: vec![t],
                        task_status_count: StatusCounts::default(),
                    },
                )],
            )],
            ..Snapshot::default()
        };

        let grid = render_grid(&snapshot, &state(), Timezone::utc());
        match &grid.rows[0].cells[0].kind {
            CellKind::Active { tasks } => {
                assert_eq!(tasks[0].eta_nanos, Some(60 * NS_PER_SEC));
                assert_eq!(tasks[0].tooltip.eta.as_deref(), Some("1m 0s"));
            }
            other => panic!("expected active cell, got {:?}", other),
        }
    }

    #[test]
    fn test_overdue_task_eta_is_unknown() {
        let mut t = task("t1", "compile", TaskStatus::Started);
        t.start_time = 0;
        t.expected_duration = 10 * NS_PER_SEC;
        let eta = initial_eta_nanos(t.expected_duration, t.start_time, 100 * NS_PER_SEC);
        let tooltip = render_tooltip(&t, Some(eta));
        assert_eq!(tooltip.eta.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_finished_task_has_no_eta() {
        let grid = render_grid(&simple_snapshot(), &state(), Timezone::utc());
        match &grid.rows[0].cells[0].kind {
            CellKind::Active { tasks } => {
                assert!(tasks[0].eta_nanos.is_none());
                assert!(tasks[0].tooltip.eta.is_none());
            }
            other => panic!("expected active cell, got {:?}", other),
        }
    }
}
