//! One-shot waterfall grid printing for the `view` command.

use super::colors::*;
use crate::grid::{CellKind, FailedTestDisplay, GridView, TaskBox, VersionHeader, NO_BUILDS_MESSAGE};
use crate::status::StatusCategory;
use crate::view_state::PageControls;
use terminal_size::{terminal_size, Width};

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const TASK_BOX_CHAR: &str = "■";

/// Get the current terminal width, falling back to a default if unavailable
fn get_terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// ANSI color for a status category.
pub fn category_color(category: StatusCategory) -> &'static str {
    match category {
        StatusCategory::Success => GREEN,
        StatusCategory::Failed => RED,
        StatusCategory::SystemFailed => MAGENTA,
        StatusCategory::Started | StatusCategory::Dispatched => CYAN,
        StatusCategory::Unstarted => YELLOW,
        StatusCategory::Undispatched => GRAY,
        StatusCategory::Inactive | StatusCategory::None => DIM,
    }
}

fn truncate_to_width(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_len {
        text.to_string()
    } else if max_len < 4 {
        "...".to_string()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Print the full grid to stdout. With `detail` set, each cell's task
/// tooltips are printed under the row.
pub fn print_grid(grid: &GridView, controls: &PageControls, detail: bool) {
    if grid.no_builds {
        println!("{GRAY}{}{RESET}", NO_BUILDS_MESSAGE);
        return;
    }

    let width = get_terminal_width();

    println!("{BOLD}waterfall:{RESET} {}", grid.project);
    println!();

    print_headers(grid, width);
    println!();

    for row in &grid.rows {
        println!("{BOLD}{}{RESET} {GRAY}({}){RESET}", row.variant_name, row.variant_link);
        for (i, cell) in row.cells.iter().enumerate() {
            print_cell_line(i + 1, cell);
            if detail {
                print_cell_detail(cell);
            }
        }
    }

    println!();
    print_page_controls(controls);
}

fn print_headers(grid: &GridView, width: usize) {
    println!("{BOLD}Versions:{RESET}");
    for (i, header) in grid.headers.iter().enumerate() {
        match header {
            VersionHeader::Active {
                commit,
                author,
                message,
                formatted_time,
                ..
            } => {
                // "  [n] <commit> <time> <author> - <message>"
                let overhead = 6
                    + commit.chars().count()
                    + formatted_time.chars().count()
                    + author.chars().count()
                    + 5;
                let budget = width.saturating_sub(overhead).max(10);
                println!(
                    "  [{}] {CYAN}{}{RESET} {} {BOLD}{}{RESET} - {}",
                    i + 1,
                    commit,
                    formatted_time,
                    author,
                    truncate_to_width(message, budget)
                );
            }
            VersionHeader::RolledUp { title, .. } => {
                println!("  [{}] {GRAY}{}{RESET}", i + 1, title);
            }
        }
    }
}

fn print_cell_line(index: usize, cell: &crate::grid::Cell) {
    let body = match &cell.kind {
        CellKind::RolledUp => format!("{DIM}inactive build{RESET}"),
        CellKind::Missing => format!("{GRAY}-{RESET}"),
        CellKind::Collapsed {
            segments,
            active_tasks,
        } => {
            let mut parts: Vec<String> = segments
                .iter()
                .map(|segment| {
                    format!(
                        "{}{} {}{RESET}",
                        category_color(segment.category),
                        segment.count,
                        segment.category
                    )
                })
                .collect();
            if !active_tasks.is_empty() {
                parts.push(task_boxes(active_tasks));
            }
            parts.join(" | ")
        }
        CellKind::Active { tasks } => task_boxes(tasks),
    };
    println!("  [{}] {}", index, body);
}

fn task_boxes(tasks: &[TaskBox]) -> String {
    tasks
        .iter()
        .map(|task| format!("{}{TASK_BOX_CHAR}{RESET}", category_color(task.category)))
        .collect::<Vec<_>>()
        .join("")
}

fn print_cell_detail(cell: &crate::grid::Cell) {
    let tasks = match &cell.kind {
        CellKind::Active { tasks } => tasks,
        CellKind::Collapsed { active_tasks, .. } => active_tasks,
        _ => return,
    };

    for task in tasks {
        let mut line = format!("      {GRAY}{}{RESET}", task.tooltip.top_line);
        if let Some(eta) = &task.tooltip.eta {
            line.push_str(&format!(" {CYAN}ETA: {}{RESET}", eta));
        }
        println!("{}", line);

        match &task.tooltip.failed_tests {
            FailedTestDisplay::Names(names) => {
                for name in names {
                    println!("        {RED}x{RESET} {}", name);
                }
            }
            FailedTestDisplay::Count(count) => {
                println!("        {RED}x{RESET} {} failed tests", count);
            }
            FailedTestDisplay::None => {}
        }
    }
}

fn print_page_controls(controls: &PageControls) {
    let newer = if controls.prev_enabled {
        format!("{CYAN}?{}{RESET}", controls.prev_params.encode())
    } else {
        format!("{GRAY}disabled{RESET}")
    };
    let older = if controls.next_enabled {
        format!("{CYAN}?{}{RESET}", controls.next_params.encode())
    } else {
        format!("{GRAY}disabled{RESET}")
    };
    println!("{GRAY}newer:{RESET} {}  {GRAY}older:{RESET} {}", newer, older);
}
