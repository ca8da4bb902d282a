//! Output formatting for quickdue.
//!
//! Every formatter has a pretty (colored) and a JSON form.

mod json;
mod pretty;

use chrono::NaiveDateTime;

use crate::cli::args::OutputFormat;
use crate::error::QuickdueError;
use crate::features::nlp::ParseResult;
use crate::features::stats::{PeriodReport, TaskSummary};
use crate::tasks::{CategoryCount, Task};

pub use json::*;
pub use pretty::*;

/// Format a parse preview based on output format.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_parse(result: &ParseResult, format: OutputFormat) -> Result<String, QuickdueError> {
    match format {
        OutputFormat::Pretty => Ok(format_parse_pretty(result)),
        OutputFormat::Json => format_parse_json(result),
    }
}

/// Format tasks based on output format.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    title: &str,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title, now)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, QuickdueError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format categories based on output format.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_categories(
    categories: &[CategoryCount],
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    match format {
        OutputFormat::Pretty => Ok(format_categories_pretty(categories)),
        OutputFormat::Json => format_categories_json(categories),
    }
}

/// Format statistics based on output format.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_stats(
    summary: &TaskSummary,
    report: &PeriodReport,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(summary, report)),
        OutputFormat::Json => format_stats_json(summary, report),
    }
}
