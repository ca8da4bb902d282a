use colored::Colorize;

use crate::core::{format_datetime, Schedulable};
use crate::features::nlp::ParseResult;
use crate::features::stats::{PeriodReport, TaskSummary};
use crate::tasks::{CategoryCount, Priority, Task};

fn priority_label(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::High => "high".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".dimmed(),
    }
}

/// Format a parse preview.
pub fn format_parse_pretty(result: &ParseResult) -> String {
    let none = || "-".dimmed().to_string();
    let text = if result.cleaned_text.is_empty() {
        none()
    } else {
        result.cleaned_text.bold().to_string()
    };

    let mut output = format!("{}: {}\n", "Text".dimmed(), text);
    output.push_str(&format!(
        "{}: {}\n",
        "Date".dimmed(),
        result.date_iso().map_or_else(none, |d| d.yellow().to_string())
    ));
    output.push_str(&format!(
        "{}: {}\n",
        "Time".dimmed(),
        result.time_hhmm().map_or_else(none, |t| t.yellow().to_string())
    ));
    output
}

/// Format a list of tasks as a table.
///
/// Deadlines before `now` on open tasks are shown in red.
pub fn format_tasks_pretty(tasks: &[Task], title: &str, now: chrono::NaiveDateTime) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let status_icon = if task.completed {
            "[x]".green()
        } else {
            "[ ]".white()
        };

        let mut line = format!(
            "{} {} {}",
            format!("#{}", task.id).dimmed(),
            status_icon,
            task.text.bold()
        );
        line.push_str(&format!("  {}", task.category.cyan()));
        line.push_str(&format!("  {}", priority_label(task.priority)));

        if let Some(deadline) = task.deadline {
            let shown = format_datetime(deadline);
            if task.is_overdue(now) {
                line.push_str(&format!("  {}", shown.red()));
            } else {
                line.push_str(&format!("  {}", shown.yellow()));
            }
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task.
pub fn format_task_pretty(task: &Task) -> String {
    let status_icon = if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    };

    let mut output = format!("{} {}\n", status_icon, task.text.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Priority".dimmed(),
        priority_label(task.priority)
    ));
    output.push_str(&format!("  {}: {}\n", "Category".dimmed(), task.category));

    if let Some(deadline) = task.deadline {
        output.push_str(&format!(
            "  {}: {}\n",
            "Due".dimmed(),
            format_datetime(deadline)
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        format_datetime(task.created_at)
    ));

    if let Some(completed_at) = task.completed_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Completed".dimmed(),
            format_datetime(completed_at)
        ));
    }

    output
}

/// Format categories with pending counts.
pub fn format_categories_pretty(categories: &[CategoryCount]) -> String {
    if categories.is_empty() {
        return "Categories (0)\n  No categories".to_string();
    }

    let mut output = format!("Categories ({})\n", categories.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "  {:<20} {} pending\n",
            category.name.bold(),
            category.pending
        ));
    }

    output
}

/// Format the summary and period report.
pub fn format_stats_pretty(summary: &TaskSummary, report: &PeriodReport) -> String {
    let mut output = format!("{}\n", "Summary".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!("  {:<12} {}\n", "Total", summary.total));
    output.push_str(&format!(
        "  {:<12} {}\n",
        "Completed",
        summary.completed.to_string().green()
    ));
    output.push_str(&format!("  {:<12} {}\n", "Pending", summary.pending));
    output.push_str(&format!(
        "  {:<12} {}\n",
        "Overdue",
        summary.overdue.to_string().red()
    ));
    output.push_str(&format!("  {:<12} {}%\n", "Rate", summary.completion_rate));

    output.push('\n');
    output.push_str(&format!(
        "{} (since {})\n",
        format!("This {}", report.period).bold(),
        format_datetime(report.start)
    ));
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  {} of {} done, {}%\n",
        report.completed.len(),
        report.total,
        report.success_rate
    ));

    for task in &report.completed {
        output.push_str(&format!("  {} {}\n", "[x]".green(), task.text));
    }
    for task in &report.failed {
        output.push_str(&format!("  {} {}\n", "[!]".red(), task.text));
    }

    output
}
