//! Command implementations for quickdue.
//!
//! Each command returns the text to print; `main` owns stdout.

mod add;
mod parse;
mod shell;
mod stats;

pub use add::add;
pub use parse::preview;
pub use shell::completions;
pub use stats::stats;

use chrono::NaiveDateTime;
use colored::Colorize;
use serde_json::json;
use tracing::info;

use crate::cli::args::{EditArgs, ListArgs, OutputFormat};
use crate::config::TasksConfig;
use crate::core::Schedulable;
use crate::error::QuickdueError;
use crate::features::stats::{category_counts, todays_tasks};
use crate::output::{format_categories, format_task, format_tasks};
use crate::tasks::{TaskStore, TaskUpdate};

/// Execute list command
///
/// # Errors
///
/// Returns an error if the tasks cannot be loaded or output formatting fails.
pub fn list(
    store: &impl TaskStore,
    args: &ListArgs,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    let category = args.category.as_deref().map(str::trim);
    let search = args.search.as_deref().map(|s| s.trim().to_lowercase());

    let tasks: Vec<_> = store
        .list()?
        .into_iter()
        .filter(|t| category.map_or(true, |c| t.category.eq_ignore_ascii_case(c)))
        .filter(|t| !args.pending || !t.completed)
        .filter(|t| !args.completed || t.completed)
        .filter(|t| !args.overdue || t.is_overdue(now))
        .filter(|t| {
            search.as_deref().map_or(true, |term| {
                t.text.to_lowercase().contains(term) || t.category.to_lowercase().contains(term)
            })
        })
        .collect();

    let title = match (category, args.search.as_deref()) {
        (Some(c), _) => format!("Tasks in {c}"),
        (None, Some(term)) => format!("Tasks matching '{term}'"),
        (None, None) => "Tasks".to_string(),
    };
    format_tasks(&tasks, &title, now, format)
}

/// Execute today command
///
/// # Errors
///
/// Returns an error if the tasks cannot be loaded or output formatting fails.
pub fn today(
    store: &impl TaskStore,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    let tasks = todays_tasks(&store.list()?, now);
    format_tasks(&tasks, "Today", now, format)
}

/// Execute show command
///
/// # Errors
///
/// Returns `NotFound` if no task has this ID.
pub fn show(store: &impl TaskStore, id: i64, format: OutputFormat) -> Result<String, QuickdueError> {
    format_task(&store.get(id)?, format)
}

/// Execute done command, toggling completion
///
/// # Errors
///
/// Returns `NotFound` if no task has this ID.
pub fn done(
    store: &impl TaskStore,
    id: i64,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    let task = store.toggle(id, now)?;
    info!(id, completed = task.completed, "toggled task");

    match format {
        OutputFormat::Json => format_task(&task, format),
        OutputFormat::Pretty if task.completed => {
            Ok(format!("{} {}", "Completed:".green().bold(), task.text))
        }
        OutputFormat::Pretty => Ok(format!("{} {}", "Reopened:".yellow().bold(), task.text)),
    }
}

/// Execute delete command
///
/// # Errors
///
/// Returns `NotFound` if no task has this ID.
pub fn delete(store: &impl TaskStore, id: i64, format: OutputFormat) -> Result<String, QuickdueError> {
    store.delete(id)?;
    info!(id, "deleted task");

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "deleted": true,
            "id": id,
        }))?),
        OutputFormat::Pretty => Ok(format!("{} task {id}", "Deleted:".red().bold())),
    }
}

/// Execute edit command
///
/// # Errors
///
/// Returns `InvalidInput` when nothing would change or the category is
/// unknown, `NotFound` if no task has this ID.
pub fn edit(
    store: &impl TaskStore,
    config: &TasksConfig,
    args: EditArgs,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    let text = match args.text {
        Some(text) if text.trim().is_empty() => {
            return Err(QuickdueError::InvalidInput("Task text is empty".to_string()));
        }
        Some(text) => Some(text.trim().to_string()),
        None => None,
    };

    let update = TaskUpdate {
        text,
        priority: args.priority,
        category: args
            .category
            .map(|c| config.resolve_category(&c))
            .transpose()?,
        deadline: if args.clear_deadline {
            Some(None)
        } else {
            args.deadline.map(Some)
        },
    };

    if update.is_empty() {
        return Err(QuickdueError::InvalidInput("Nothing to change".to_string()));
    }

    let task = store.update(args.id, &update)?;
    info!(id = task.id, "edited task");
    format_task(&task, format)
}

/// Execute categories command
///
/// # Errors
///
/// Returns an error if the tasks cannot be loaded or output formatting fails.
pub fn categories(
    store: &impl TaskStore,
    config: &TasksConfig,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    let counts = category_counts(&store.list()?, &config.categories);
    format_categories(&counts, format)
}
