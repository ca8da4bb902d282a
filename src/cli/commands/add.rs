//! Add command implementation.
//!
//! Commit mode of the deadline parser: the extracted date and time are
//! merged with `--date/--time` and stored with the task.

use std::fmt::Write;

use chrono::NaiveDateTime;
use colored::Colorize;
use serde_json::json;
use tracing::{debug, info};

use crate::cli::args::{AddArgs, OutputFormat};
use crate::config::TasksConfig;
use crate::core::{assemble_deadline, format_datetime, Schedule};
use crate::error::QuickdueError;
use crate::features::nlp::{parse, ParseResult};
use crate::tasks::{NewTask, Task, TaskStore};

/// Execute the add command.
///
/// # Errors
///
/// Returns `InvalidInput` for empty text or an unknown category, or a
/// storage error if the insert fails.
pub fn add(
    store: &impl TaskStore,
    config: &TasksConfig,
    args: AddArgs,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    if args.text.trim().is_empty() {
        return Err(QuickdueError::InvalidInput("Task text is empty".to_string()));
    }

    let parsed = parse(&args.text, now);
    debug!(
        cleaned = %parsed.cleaned_text,
        date = ?parsed.date,
        time = ?parsed.time,
        "parsed task text"
    );

    let deadline = assemble_deadline(
        Schedule::from(&parsed),
        Schedule::new(args.date, args.time),
    );

    let category = match args.category {
        Some(name) => config.resolve_category(&name)?,
        None => config.default_category.clone(),
    };

    let task = NewTask {
        text: parsed.cleaned_text.clone(),
        priority: args.priority.unwrap_or(config.default_priority),
        category,
        deadline,
        created_at: now,
    };

    if args.dry_run {
        return format_preview(&task, &parsed, format);
    }

    if task.text.is_empty() {
        return Err(QuickdueError::InvalidInput(format!(
            "Nothing left of '{}' once the deadline is removed",
            args.text.trim()
        )));
    }

    let created = store.add(&task)?;
    info!(id = created.id, deadline = ?created.deadline, "created task");

    format_created(&created, &parsed, format)
}

fn parsed_json(parsed: &ParseResult) -> serde_json::Value {
    json!({
        "cleaned_text": parsed.cleaned_text,
        "date": parsed.date_iso(),
        "time": parsed.time_hhmm(),
    })
}

fn format_created(
    task: &Task,
    parsed: &ParseResult,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "created": true,
                "task": task,
                "parsed": parsed_json(parsed),
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {} (ID: {})\n",
                "Created:".green().bold(),
                task.text,
                task.id.to_string().dimmed()
            );
            if let Some(deadline) = task.deadline {
                writeln!(output, "  {} {}", "Due:".yellow(), format_datetime(deadline)).ok();
            }
            writeln!(output, "  {} {}", "Category:".cyan(), task.category).ok();
            writeln!(output, "  {} {}", "Priority:".magenta(), task.priority).ok();
            Ok(output)
        }
    }
}

fn format_preview(
    task: &NewTask,
    parsed: &ParseResult,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "created": false,
                "text": task.text,
                "priority": task.priority,
                "category": task.category,
                "deadline": task.deadline.map(format_datetime),
                "parsed": parsed_json(parsed),
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => {
            let mut output = format!("{}\n", "Parsed Task (not created)".yellow().bold());
            writeln!(output, "  {} {}", "Text:".cyan().bold(), task.text).ok();
            if let Some(deadline) = task.deadline {
                writeln!(output, "  {} {}", "Due:".yellow(), format_datetime(deadline)).ok();
            }
            writeln!(output, "  {} {}", "Category:".cyan(), task.category).ok();
            writeln!(output, "  {} {}", "Priority:".magenta(), task.priority).ok();
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{MockTaskStore, Priority};
    use chrono::{NaiveDate, NaiveTime};
    use mockall::predicate::function;

    /// Monday 2024-06-10 10:00.
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn args(text: &str) -> AddArgs {
        AddArgs {
            text: text.to_string(),
            ..AddArgs::default()
        }
    }

    fn echo_store(expected: NewTask) -> MockTaskStore {
        let mut store = MockTaskStore::new();
        store
            .expect_add()
            .with(function(move |t: &NewTask| *t == expected))
            .times(1)
            .returning(|t| {
                Ok(Task {
                    id: 1,
                    text: t.text.clone(),
                    completed: false,
                    priority: t.priority,
                    category: t.category.clone(),
                    deadline: t.deadline,
                    created_at: t.created_at,
                    completed_at: None,
                })
            });
        store
    }

    #[test]
    fn test_add_extracts_deadline() {
        let store = echo_store(NewTask {
            text: "meeting".to_string(),
            priority: Priority::Medium,
            category: "Work".to_string(),
            deadline: Some(at(11, 15, 30)),
            created_at: now(),
        });

        let output = add(
            &store,
            &TasksConfig::default(),
            args("tomorrow 15:30 meeting"),
            now(),
            OutputFormat::Json,
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["created"], true);
        assert_eq!(parsed["task"]["text"], "meeting");
        assert_eq!(parsed["parsed"]["date"], "2024-06-11");
        assert_eq!(parsed["parsed"]["time"], "15:30");
    }

    #[test]
    fn test_add_parsed_date_beats_manual_date() {
        let store = echo_store(NewTask {
            text: "report".to_string(),
            priority: Priority::High,
            category: "Learning".to_string(),
            deadline: Some(at(21, 0, 0)),
            created_at: now(),
        });

        let mut add_args = args("next week friday report");
        add_args.date = NaiveDate::from_ymd_opt(2024, 6, 30);
        add_args.time = NaiveTime::from_hms_opt(9, 0, 0);
        add_args.priority = Some(Priority::High);
        add_args.category = Some("learning".to_string());

        add(&store, &TasksConfig::default(), add_args, now(), OutputFormat::Pretty).unwrap();
    }

    #[test]
    fn test_add_manual_date_and_time() {
        let store = echo_store(NewTask {
            text: "submit report".to_string(),
            priority: Priority::Medium,
            category: "Work".to_string(),
            deadline: Some(at(14, 17, 0)),
            created_at: now(),
        });

        let mut add_args = args("submit report");
        add_args.date = NaiveDate::from_ymd_opt(2024, 6, 14);
        add_args.time = NaiveTime::from_hms_opt(17, 0, 0);

        let output =
            add(&store, &TasksConfig::default(), add_args, now(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("submit report"));
        assert!(output.contains("2024-06-14 17:00"));
    }

    #[test]
    fn test_add_lone_time_has_no_deadline() {
        let store = echo_store(NewTask {
            text: "standup".to_string(),
            priority: Priority::Medium,
            category: "Work".to_string(),
            deadline: None,
            created_at: now(),
        });

        add(&store, &TasksConfig::default(), args("standup 11:00"), now(), OutputFormat::Pretty)
            .unwrap();
    }

    #[test]
    fn test_add_dry_run_does_not_store() {
        let mut store = MockTaskStore::new();
        store.expect_add().never();

        let mut add_args = args("day after tomorrow pm 2 o'clock gym");
        add_args.dry_run = true;

        let output =
            add(&store, &TasksConfig::default(), add_args, now(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["created"], false);
        assert_eq!(parsed["text"], "gym");
        assert_eq!(parsed["deadline"], "2024-06-12 14:00");
    }

    #[test]
    fn test_add_unknown_category() {
        let mut store = MockTaskStore::new();
        store.expect_add().never();

        let mut add_args = args("read book");
        add_args.category = Some("Hobbies".to_string());

        let err = add(&store, &TasksConfig::default(), add_args, now(), OutputFormat::Pretty)
            .unwrap_err();
        assert!(matches!(err, QuickdueError::InvalidInput(_)));
    }

    #[test]
    fn test_add_rejects_empty_text() {
        let mut store = MockTaskStore::new();
        store.expect_add().never();

        let config = TasksConfig::default();
        assert!(add(&store, &config, args("   "), now(), OutputFormat::Pretty).is_err());
        assert!(add(&store, &config, args("tomorrow"), now(), OutputFormat::Pretty).is_err());
    }

    #[test]
    fn test_add_propagates_store_error() {
        let mut store = MockTaskStore::new();
        store
            .expect_add()
            .returning(|_| Err(QuickdueError::Database("disk full".to_string())));

        let err = add(&store, &TasksConfig::default(), args("water plants"), now(), OutputFormat::Pretty)
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
